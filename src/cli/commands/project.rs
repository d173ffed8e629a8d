//! `solarops project` command - project browsing and editing

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::helpers::{
    api_client, effective_format, format_short_id_str, load_records, print_records,
    resolve_config, write_csv,
};
use crate::cli::table::{CellValue, ColumnDef, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::api::ApiClient;
use crate::core::entity::{Priority, Record};
use crate::core::normalize::{normalize, parse_date};
use crate::core::session::{EditSession, SaveError};
use crate::core::validation::validate;
use crate::entities::project::{ProjectStatus, RiskStatus};
use crate::entities::{Project, ProjectDraft};
use crate::yaml::{parse_yaml_file, to_yaml_string};

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects with filtering
    List(ListArgs),

    /// Show a project's details
    Show(ShowArgs),

    /// Edit a project and submit the changes
    Edit(EditArgs),

    /// Print the normalized update payload without sending it
    Payload(PayloadArgs),

    /// Export projects as CSV
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status (e.g. "In Progress", case-insensitive)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Filter by priority
    #[arg(long, short = 'p')]
    pub priority: Option<Priority>,

    /// Search in name and type (case-insensitive substring)
    #[arg(long)]
    pub search: Option<String>,

    /// Read records from a JSON file instead of the backend
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Project ID
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Project ID
    pub id: String,

    /// Edit milestones, tasks and risks through an interactive menu
    #[arg(long, short = 'i', conflicts_with = "from")]
    pub interactive: bool,

    /// Submit a draft from a YAML or JSON file instead of opening an editor
    #[arg(long)]
    pub from: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct PayloadArgs {
    /// Project ID (fetches the current record)
    #[arg(required_unless_present = "from")]
    pub id: Option<String>,

    /// Read the draft from a YAML or JSON file
    #[arg(long, conflicts_with = "id")]
    pub from: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Read records from a JSON file instead of the backend
    #[arg(long)]
    pub input: Option<PathBuf>,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("ID", 17),
    ColumnDef::new("NAME", 28),
    ColumnDef::new("TYPE", 12),
    ColumnDef::new("STATUS", 12),
    ColumnDef::new("PRIORITY", 9),
    ColumnDef::new("PROGRESS", 8),
    ColumnDef::new("LOCATION", 18),
    ColumnDef::new("TARGET", 10),
];

const STATUSES: [ProjectStatus; 5] = [
    ProjectStatus::Planning,
    ProjectStatus::InProgress,
    ProjectStatus::OnHold,
    ProjectStatus::Completed,
    ProjectStatus::Cancelled,
];

const PRIORITIES: [Priority; 4] = [
    Priority::Low,
    Priority::Medium,
    Priority::High,
    Priority::Critical,
];

pub fn run(cmd: ProjectCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ProjectCommands::List(args) => run_list(args, global),
        ProjectCommands::Show(args) => run_show(args, global),
        ProjectCommands::Edit(args) => run_edit(args, global),
        ProjectCommands::Payload(args) => run_payload(args, global),
        ProjectCommands::Export(args) => run_export(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global);
    let mut projects: Vec<Project> = load_records(&config, args.input.as_deref())?;

    if let Some(ref status) = args.status {
        projects.retain(|p| p.details.status.to_string().eq_ignore_ascii_case(status.trim()));
    }
    if let Some(priority) = args.priority {
        projects.retain(|p| p.details.priority == priority);
    }
    if let Some(ref search) = args.search {
        let needle = search.to_lowercase();
        projects.retain(|p| {
            p.details.name.to_lowercase().contains(&needle)
                || p.details.project_type.to_lowercase().contains(&needle)
        });
    }

    print_records(&projects, global, &config, COLUMNS, |p| {
        let d = &p.details;
        TableRow::new(&p.id)
            .cell(CellValue::Id(p.id.clone()))
            .cell(CellValue::Text(d.name.clone()))
            .cell(CellValue::text(Some(d.project_type.as_str())))
            .cell(CellValue::Status(d.status.to_string()))
            .cell(CellValue::Priority(d.priority))
            .cell(CellValue::Percent(d.progress))
            .cell(
                d.location
                    .as_ref()
                    .map(|l| CellValue::Text(l.label().to_string()))
                    .unwrap_or(CellValue::Empty),
            )
            .cell(CellValue::date(d.target_completion_date))
    })
}

fn fetch_project(client: &ApiClient, id: &str) -> Result<Project> {
    client
        .fetch::<Project>(id)
        .map_err(|e| miette::miette!("Failed to load project '{}': {}", id, e))
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global);
    let client = api_client(&config)?;
    let project = fetch_project(&client, &args.id)?;

    match effective_format(global, &config, OutputFormat::Yaml) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&project).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&project).into_diagnostic()?);
        }
        OutputFormat::Id => println!("{}", project.id),
        _ => print_project(&project),
    }
    Ok(())
}

fn print_project(project: &Project) {
    let d = &project.details;
    println!("{}", style("─".repeat(60)).dim());
    println!("{}: {}", style("ID").bold(), style(&project.id).cyan());
    println!("{}: {}", style("Name").bold(), style(project.display_name()).yellow());
    if !d.project_type.is_empty() {
        println!("{}: {}", style("Type").bold(), d.project_type);
    }
    println!("{}: {}", style("Status").bold(), d.status);
    println!("{}: {}", style("Priority").bold(), d.priority);
    println!("{}: {:.1}%", style("Progress").bold(), d.progress);
    if let Some(capacity) = d.capacity {
        println!("{}: {} kW", style("Capacity").bold(), capacity);
    }
    if let Some(value) = d.contract_value {
        println!("{}: {:.2}", style("Contract Value").bold(), value);
    }
    if let Some(ref location) = d.location {
        println!("{}: {}", style("Location").bold(), location.label());
    }
    if let Some(ref order) = d.service_order {
        println!("{}: {}", style("Service Order").bold(), order.label());
    }
    if let Some(ref leader) = d.project_leader {
        println!("{}: {}", style("Project Leader").bold(), leader.label());
    }
    if !d.subcontractors.is_empty() {
        let names: Vec<&str> = d.subcontractors.iter().map(|s| s.label()).collect();
        println!("{}: {}", style("Subcontractors").bold(), names.join(", "));
    }
    for (label, date) in [
        ("Planned Start", d.planned_start_date),
        ("Target Completion", d.target_completion_date),
        ("Actual Start", d.actual_start_date),
        ("Actual Completion", d.actual_completion_date),
    ] {
        if let Some(date) = date {
            println!("{}: {}", style(label).bold(), date.format("%Y-%m-%d"));
        }
    }
    println!("{}", style("─".repeat(60)).dim());

    if !d.milestones.is_empty() {
        println!();
        println!("{}", style("Milestones:").bold());
        for m in &d.milestones {
            let due = m
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("  {} (due {}, {:.0}%)", style(&m.name).yellow(), due, m.progress);
            for t in &m.tasks {
                let assignee = t
                    .assigned_to
                    .as_ref()
                    .map(|a| format!(" @{}", a.label()))
                    .unwrap_or_default();
                println!("    - {} [{}]{}", t.name, t.status, style(assignee).dim());
            }
            for deliverable in &m.deliverables {
                println!("    * {}", style(deliverable).dim());
            }
        }
    }

    if !d.risks.is_empty() {
        println!();
        println!("{}", style("Risks:").bold());
        for r in &d.risks {
            let score = r.score();
            let styled_score = if r.status == RiskStatus::Open && score >= 5.0 {
                style(format!("{:.1}", score)).red()
            } else {
                style(format!("{:.1}", score)).dim()
            };
            println!(
                "  {} [{} / {}] score {}",
                style(&r.title).yellow(),
                r.severity,
                r.status,
                styled_score
            );
        }
    }

    if let Some(ref notes) = d.notes {
        if !notes.is_empty() {
            println!();
            println!("{}", style("Notes:").bold());
            println!("{}", notes);
        }
    }
}

fn run_payload(args: PayloadArgs, global: &GlobalOpts) -> Result<()> {
    let draft: ProjectDraft = match (&args.from, &args.id) {
        (Some(path), _) => parse_yaml_file(path)?,
        (None, Some(id)) => {
            let config = resolve_config(global);
            let client = api_client(&config)?;
            fetch_project(&client, id)?.details
        }
        (None, None) => return Err(miette::miette!("Give a project ID or --from FILE")),
    };

    if let Err(errors) = validate(&draft) {
        if !global.quiet {
            eprintln!("{} draft would be rejected on save:", style("!").yellow());
            for error in &errors.errors {
                eprintln!("  {}", error);
            }
        }
    }

    let payload = normalize(&draft);
    match global.format {
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(&payload).into_diagnostic()?),
        _ => println!("{}", serde_json::to_string_pretty(&payload).into_diagnostic()?),
    }
    Ok(())
}

fn run_export(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global);
    let projects: Vec<Project> = load_records(&config, args.input.as_deref())?;
    write_csv(&projects, args.output.as_deref(), global.quiet)
}

fn run_edit(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global);
    let client = api_client(&config)?;
    let mut session = EditSession::open(&client, &args.id)
        .map_err(|e| miette::miette!("Failed to load project '{}': {}", args.id, e))?;
    session.begin_edit();

    if args.interactive {
        return edit_interactive(&mut session, &client, global);
    }

    let from_editor = args.from.is_none();
    let draft_file = match args.from {
        Some(path) => {
            session.replace_draft(parse_yaml_file(&path)?);
            path
        }
        None => {
            let path = draft_path(&session.record().id);
            let draft = session.draft().cloned().unwrap_or_default();
            fs::write(&path, to_yaml_string(&draft).into_diagnostic()?).into_diagnostic()?;

            if !global.quiet {
                println!(
                    "Opening {} in {}...",
                    style(format_short_id_str(&args.id)).cyan(),
                    style(config.editor()).yellow()
                );
            }
            let status = config.run_editor(&path).into_diagnostic()?;
            if !status.success() {
                return Err(miette::miette!(
                    "Editor exited with {}; draft left at {}",
                    status,
                    path.display()
                ));
            }
            match parse_yaml_file(&path) {
                Ok(draft) => session.replace_draft(draft),
                Err(e) => {
                    print_retry_hint(&args.id, &path);
                    return Err(e.into());
                }
            }
            path
        }
    };

    if !session.is_dirty() {
        if !global.quiet {
            println!("No changes to save.");
        }
        if from_editor {
            discard_draft_file(&draft_file);
        }
        return Ok(());
    }

    match session.save(&client) {
        Ok(project) => {
            if !global.quiet {
                println!(
                    "{} Saved project {}",
                    style("✓").green(),
                    style(project.display_name()).cyan()
                );
            }
            if from_editor {
                discard_draft_file(&draft_file);
            }
            Ok(())
        }
        Err(e) => {
            print_retry_hint(&args.id, &draft_file);
            Err(e.into())
        }
    }
}

fn draft_path(id: &str) -> PathBuf {
    let safe: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    std::env::temp_dir().join(format!("solarops-project-{}.yaml", safe))
}

/// Remove the editor's temp file; a failure only leaves a stale file behind
fn discard_draft_file(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not remove draft file");
            false
        }
    }
}

fn print_retry_hint(id: &str, path: &Path) {
    eprintln!(
        "Draft kept at {}. Retry with: {}",
        style(path.display()).cyan(),
        style(format!("solarops project edit {} --from {}", id, path.display())).yellow()
    );
}

/// Menu entries for interactive editing
#[derive(Debug, Clone, Copy)]
enum MenuAction {
    Rename,
    SetStatus,
    SetPriority,
    SetProgress,
    AddMilestone,
    RemoveMilestone,
    AddTask,
    RemoveTask,
    AddDeliverable,
    RemoveDeliverable,
    AddRisk,
    RemoveRisk,
    Save,
    Cancel,
}

impl MenuAction {
    const ALL: [MenuAction; 14] = [
        MenuAction::Rename,
        MenuAction::SetStatus,
        MenuAction::SetPriority,
        MenuAction::SetProgress,
        MenuAction::AddMilestone,
        MenuAction::RemoveMilestone,
        MenuAction::AddTask,
        MenuAction::RemoveTask,
        MenuAction::AddDeliverable,
        MenuAction::RemoveDeliverable,
        MenuAction::AddRisk,
        MenuAction::RemoveRisk,
        MenuAction::Save,
        MenuAction::Cancel,
    ];
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MenuAction::Rename => "Rename project",
            MenuAction::SetStatus => "Set status",
            MenuAction::SetPriority => "Set priority",
            MenuAction::SetProgress => "Set progress",
            MenuAction::AddMilestone => "Add milestone",
            MenuAction::RemoveMilestone => "Remove milestone",
            MenuAction::AddTask => "Add task",
            MenuAction::RemoveTask => "Remove task",
            MenuAction::AddDeliverable => "Add deliverable",
            MenuAction::RemoveDeliverable => "Remove deliverable",
            MenuAction::AddRisk => "Add risk",
            MenuAction::RemoveRisk => "Remove risk",
            MenuAction::Save => "Save",
            MenuAction::Cancel => "Cancel",
        };
        write!(f, "{}", label)
    }
}

fn edit_interactive(
    session: &mut EditSession,
    client: &ApiClient,
    global: &GlobalOpts,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        let Some(draft) = session.draft_mut() else {
            return Ok(());
        };
        println!(
            "{}  {} milestone(s), {} task(s), {} risk(s)",
            style(&draft.name).bold(),
            draft.milestones.len(),
            draft.task_count(),
            draft.risks.len()
        );

        let choice = Select::with_theme(&theme)
            .with_prompt("Action")
            .items(&MenuAction::ALL)
            .default(0)
            .interact()
            .into_diagnostic()?;

        match MenuAction::ALL[choice] {
            MenuAction::Save => match session.save(client) {
                Ok(project) => {
                    if !global.quiet {
                        println!(
                            "{} Saved project {}",
                            style("✓").green(),
                            style(project.display_name()).cyan()
                        );
                    }
                    return Ok(());
                }
                Err(SaveError::Invalid(errors)) => {
                    eprintln!("{} Fix these fields before saving:", style("!").yellow());
                    for error in &errors.errors {
                        eprintln!("  {}", error);
                    }
                }
                Err(e) => {
                    eprintln!("{} {}", style("✗").red(), e);
                }
            },
            MenuAction::Cancel => {
                session
                    .cancel(client)
                    .map_err(|e| miette::miette!("Edit discarded, but reload failed: {}", e))?;
                if !global.quiet {
                    println!("Edit discarded.");
                }
                return Ok(());
            }
            action => apply_action(action, draft, &theme)?,
        }
    }
}

fn apply_action(action: MenuAction, draft: &mut ProjectDraft, theme: &ColorfulTheme) -> Result<()> {
    match action {
        MenuAction::Rename => {
            draft.name = Input::with_theme(theme)
                .with_prompt("Name")
                .with_initial_text(draft.name.clone())
                .interact_text()
                .into_diagnostic()?;
        }
        MenuAction::SetStatus => {
            let current = STATUSES.iter().position(|s| *s == draft.status).unwrap_or(0);
            let idx = Select::with_theme(theme)
                .with_prompt("Status")
                .items(&STATUSES)
                .default(current)
                .interact()
                .into_diagnostic()?;
            draft.status = STATUSES[idx];
        }
        MenuAction::SetPriority => {
            let current = PRIORITIES.iter().position(|p| *p == draft.priority).unwrap_or(1);
            let idx = Select::with_theme(theme)
                .with_prompt("Priority")
                .items(&PRIORITIES)
                .default(current)
                .interact()
                .into_diagnostic()?;
            draft.priority = PRIORITIES[idx];
        }
        MenuAction::SetProgress => {
            draft.progress = Input::<f64>::with_theme(theme)
                .with_prompt("Progress (0-100)")
                .default(draft.progress)
                .interact_text()
                .into_diagnostic()?;
        }
        MenuAction::AddMilestone => {
            let key = draft.add_milestone();
            let name: String = Input::with_theme(theme)
                .with_prompt("Milestone name")
                .interact_text()
                .into_diagnostic()?;
            let due: String = Input::with_theme(theme)
                .with_prompt("Due date (YYYY-MM-DD)")
                .allow_empty(true)
                .interact_text()
                .into_diagnostic()?;
            if let Some(idx) = draft.milestone_index(key) {
                let milestone = &mut draft.milestones[idx];
                milestone.name = name;
                if let Some(date) = parse_date(&due) {
                    milestone.due_date = Some(date);
                }
            }
        }
        MenuAction::RemoveMilestone => {
            if let Some(idx) = pick_milestone(draft, theme, "Remove milestone")? {
                remove_picked_milestone(draft, idx);
            }
        }
        MenuAction::AddTask => {
            if let Some(m) = pick_milestone(draft, theme, "Add task to")? {
                let name: String = Input::with_theme(theme)
                    .with_prompt("Task name")
                    .interact_text()
                    .into_diagnostic()?;
                if let Some(key) = draft.add_task(m) {
                    if let Some(task) =
                        draft.milestones[m].tasks.iter_mut().find(|t| t.key == key)
                    {
                        task.name = name;
                    }
                }
            }
        }
        MenuAction::RemoveTask => {
            if let Some(m) = pick_milestone(draft, theme, "Remove task from")? {
                let names: Vec<&str> = draft.milestones[m]
                    .tasks
                    .iter()
                    .map(|t| t.name.as_str())
                    .collect();
                if let Some(t) = pick(&names, theme, "Task")? {
                    remove_picked_task(draft, m, t);
                }
            }
        }
        MenuAction::AddDeliverable => {
            if let Some(m) = pick_milestone(draft, theme, "Add deliverable to")? {
                let text: String = Input::with_theme(theme)
                    .with_prompt("Deliverable")
                    .allow_empty(true)
                    .interact_text()
                    .into_diagnostic()?;
                draft.add_deliverable(m, &text);
            }
        }
        MenuAction::RemoveDeliverable => {
            if let Some(m) = pick_milestone(draft, theme, "Remove deliverable from")? {
                let items: Vec<&str> = draft.milestones[m]
                    .deliverables
                    .iter()
                    .map(String::as_str)
                    .collect();
                if let Some(d) = pick(&items, theme, "Deliverable")? {
                    draft.remove_deliverable(m, d);
                }
            }
        }
        MenuAction::AddRisk => {
            let key = draft.add_risk();
            let title: String = Input::with_theme(theme)
                .with_prompt("Risk title")
                .interact_text()
                .into_diagnostic()?;
            let severity = Select::with_theme(theme)
                .with_prompt("Severity")
                .items(&PRIORITIES)
                .default(1)
                .interact()
                .into_diagnostic()?;
            if let Some(risk) = draft.risks.iter_mut().find(|r| r.key == key) {
                risk.title = title;
                risk.severity = PRIORITIES[severity];
            }
        }
        MenuAction::RemoveRisk => {
            let titles: Vec<&str> = draft.risks.iter().map(|r| r.title.as_str()).collect();
            if let Some(idx) = pick(&titles, theme, "Remove risk")? {
                remove_picked_risk(draft, idx);
            }
        }
        MenuAction::Save | MenuAction::Cancel => {}
    }
    Ok(())
}

// Pickers return positions; removal goes through the entry's key so the
// choice stays bound to the entry that was shown.

fn remove_picked_milestone(draft: &mut ProjectDraft, idx: usize) -> bool {
    match draft.milestones.get(idx).map(|m| m.key) {
        Some(key) => draft.remove_milestone_by_key(key),
        None => false,
    }
}

fn remove_picked_task(draft: &mut ProjectDraft, milestone: usize, idx: usize) -> bool {
    let key = draft
        .milestones
        .get(milestone)
        .and_then(|m| m.tasks.get(idx))
        .map(|t| t.key);
    match key {
        Some(key) => draft.remove_task_by_key(key),
        None => false,
    }
}

fn remove_picked_risk(draft: &mut ProjectDraft, idx: usize) -> bool {
    match draft.risks.get(idx).map(|r| r.key) {
        Some(key) => draft.remove_risk_by_key(key),
        None => false,
    }
}

fn pick_milestone(
    draft: &ProjectDraft,
    theme: &ColorfulTheme,
    prompt: &str,
) -> Result<Option<usize>> {
    let names: Vec<&str> = draft.milestones.iter().map(|m| m.name.as_str()).collect();
    pick(&names, theme, prompt)
}

/// Select one of `items`; `None` when the list is empty
fn pick(items: &[&str], theme: &ColorfulTheme, prompt: &str) -> Result<Option<usize>> {
    if items.is_empty() {
        println!("{}", style("Nothing to choose from.").dim());
        return Ok(None);
    }
    let labels: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if s.is_empty() {
                format!("#{} (unnamed)", i + 1)
            } else {
                s.to_string()
            }
        })
        .collect();
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()
        .map(Some)
        .into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_path_is_sanitized() {
        let path = draft_path("65f1/../x y");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert_eq!(name, "solarops-project-65f1____x_y.yaml");
    }

    #[test]
    fn test_picked_entries_removed_by_key() {
        let mut draft = ProjectDraft::default();
        draft.add_milestone();
        draft.add_milestone();
        draft.milestones[0].name = "Permits".to_string();
        draft.milestones[1].name = "Install".to_string();
        draft.add_task(1);
        draft.add_task(1);
        draft.milestones[1].tasks[1].name = "Mount".to_string();
        draft.add_risk();
        draft.add_risk();
        draft.risks[0].title = "Weather".to_string();

        assert!(remove_picked_task(&mut draft, 1, 0));
        assert_eq!(draft.milestones[1].tasks.len(), 1);
        assert_eq!(draft.milestones[1].tasks[0].name, "Mount");
        assert!(!remove_picked_task(&mut draft, 1, 5));
        assert!(!remove_picked_task(&mut draft, 7, 0));

        assert!(remove_picked_milestone(&mut draft, 0));
        assert_eq!(draft.milestones.len(), 1);
        assert_eq!(draft.milestones[0].name, "Install");
        assert!(!remove_picked_milestone(&mut draft, 3));

        assert!(remove_picked_risk(&mut draft, 1));
        assert_eq!(draft.risks.len(), 1);
        assert_eq!(draft.risks[0].title, "Weather");
        assert!(!remove_picked_risk(&mut draft, 1));
    }

    #[test]
    fn test_discard_draft_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.yaml");
        std::fs::write(&path, "name: x\n").unwrap();
        assert!(discard_draft_file(&path));
        assert!(!path.exists());
        assert!(!discard_draft_file(&path));
    }

    #[test]
    fn test_menu_covers_structural_operations() {
        let labels: Vec<String> = MenuAction::ALL.iter().map(|a| a.to_string()).collect();
        for expected in ["Add milestone", "Remove task", "Add deliverable", "Remove risk", "Save"] {
            assert!(labels.iter().any(|l| l == expected));
        }
    }
}
