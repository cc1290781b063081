//! Faculty Directory CLI
//!
//! One-shot listing, lookup and export commands plus an interactive
//! `browse` session driven by stdin lines.

use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};

use directory::{
    app::{
        AppState, ConsoleNotifier, JsonRenderer, KeyPress, Notifier, Renderer, Session, Severity,
        TextRenderer, ToastNotifier, UiEvent, View,
    },
    error::{AppError, Result},
    models::{Config, Designation, Directory, FacultyRecord, QueryState},
    pipeline,
    services::{self, Enricher, HomeStats, PageTarget, export},
    utils::log as console,
};

/// Faculty Directory - search, filter and export campus faculty
#[derive(Parser, Debug)]
#[command(name = "directory", version, about = "Campus faculty directory")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Dataset file path or http(s) URL, overriding the configured source
    #[arg(short, long)]
    dataset: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List faculty matching the filters, one page at a time
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Show every field of one faculty member
    Show { id: u32 },

    /// Summarize schools with their faculty counts
    Schools,

    /// Suggest faculty by partial name
    Lookup {
        name: String,

        /// Treat NAME as an exact name and print its card
        #[arg(long)]
        select: bool,
    },

    /// Write faculty matching the filters to CSV
    Export {
        /// Output file (default: export.file_name from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show campus information
    Info {
        #[arg(value_enum, default_value_t = Section::Home)]
        section: Section,
    },

    /// Validate configuration and dataset
    Validate,

    /// Interactive session reading commands from stdin
    Browse,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Case-insensitive text matched against name, department, cabin and
    /// specializations
    #[arg(short, long)]
    search: Option<String>,

    /// School code (e.g., SCOPE)
    #[arg(long)]
    school: Option<String>,

    /// Professor, Associate Professor or Assistant Professor
    #[arg(long)]
    designation: Option<Designation>,

    /// Exact department
    #[arg(long)]
    department: Option<String>,
}

impl FilterArgs {
    fn to_query(&self) -> QueryState {
        let mut query = QueryState::default();
        if let Some(term) = &self.search {
            query = query.with_search(term.as_str());
        }
        if let Some(code) = &self.school {
            query = query.with_school(code.as_str());
        }
        if let Some(designation) = self.designation {
            query = query.with_designation(designation);
        }
        if let Some(department) = &self.department {
            query = query.with_department(department.as_str());
        }
        query
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Section {
    Home,
    Campus,
    Map,
    Contact,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
    console::init(level);
}

/// Fetch and enrich the dataset. Load failures are reported to the notifier
/// and leave an empty directory.
async fn load(config: &Config, notifier: &dyn Notifier) -> Result<Directory> {
    let source = pipeline::source_for(&config.dataset.source, &config.dataset)?;
    log::info!("Loading faculty from {}", source.describe());
    Ok(pipeline::bootstrap(config, source.as_ref(), notifier).await)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_record(record: &FacultyRecord) {
    console::summary(
        &record.name,
        &[
            ("ID", record.id.to_string()),
            ("Designation", record.designation.to_string()),
            ("School", format!("{} ({})", record.school_name, record.school)),
            ("Department", record.department.clone()),
            ("Email", record.email.clone()),
            ("Phone", record.phone.clone()),
            ("Intercom", record.intercom.clone()),
            ("Qualification", record.qualification.clone()),
            ("Cabin", record.cabin_location.clone()),
            ("Specializations", record.specialization.join(", ")),
        ],
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config);
    if let Some(dataset) = cli.dataset {
        config.dataset.source = dataset;
    }
    init_logging(cli.verbose, &config.logging.level);

    let notifier = ConsoleNotifier;

    match cli.command {
        Command::List { filters, page } => {
            let directory = load(&config, &notifier).await?;
            let query = QueryState {
                page,
                ..filters.to_query()
            };
            let state = AppState::with_query(directory, config.directory.page_size, query);
            if cli.json {
                JsonRenderer::new(io::stdout()).render(&state.snapshot())?;
            } else {
                TextRenderer::new(io::stdout()).render(&state.snapshot())?;
            }
        }

        Command::Show { id } => {
            let directory = load(&config, &notifier).await?;
            let record = directory
                .get(id)
                .ok_or_else(|| AppError::not_found(format!("faculty id {}", id)))?;
            if cli.json {
                print_json(record)?;
            } else {
                print_record(record);
            }
        }

        Command::Schools => {
            let directory = load(&config, &notifier).await?;
            if cli.json {
                print_json(&directory.schools)?;
            } else {
                console::header("Schools");
                for school in &directory.schools {
                    console::info(&format!("{} - {}", school.code, school.name));
                    console::sub_item(&format!(
                        "{} faculty | Dean: {} | Est. {}",
                        school.faculty_count, school.dean, school.established
                    ));
                    console::sub_item(&format!("Programs: {}", school.programs.join(", ")));
                }
            }
        }

        Command::Lookup { name, select } => {
            let directory = load(&config, &notifier).await?;
            if select {
                let card = services::select(&directory.records, &name)
                    .ok_or_else(|| AppError::not_found(format!("faculty named '{}'", name)))?;
                if cli.json {
                    print_json(&card)?;
                } else {
                    console::summary(
                        &card.name,
                        &[
                            ("Cabin", card.cabin.clone()),
                            ("Department", card.department.clone()),
                            ("Image", card.image.clone().unwrap_or_else(|| "-".into())),
                        ],
                    );
                }
            } else {
                let matches =
                    services::suggest(&directory.records, &name, config.directory.typeahead_limit);
                if cli.json {
                    let names: Vec<&str> = matches.iter().map(|r| r.name.as_str()).collect();
                    print_json(&names)?;
                } else if matches.is_empty() {
                    console::info(&format!("No faculty named like '{}'", name));
                } else {
                    for record in matches {
                        console::info(&format!("{} ({})", record.name, record.cabin_location));
                    }
                }
            }
        }

        Command::Export { output, filters } => {
            let directory = load(&config, &notifier).await?;
            let path = output.unwrap_or_else(|| PathBuf::from(&config.export.file_name));
            let results = services::query(&directory.records, &filters.to_query());
            match export::write_csv(&path, &results).await {
                Ok(count) => {
                    notifier.notify("Faculty data exported successfully!", Severity::Info);
                    log::info!("{} rows written to {}", count, path.display());
                }
                Err(e) => {
                    notifier.notify(&format!("Export failed: {}", e), Severity::Error);
                    return Err(e);
                }
            }
        }

        Command::Info { section } => {
            let campus = &config.campus;
            match section {
                Section::Home => {
                    let directory = load(&config, &notifier).await?;
                    let stats =
                        HomeStats::new(&directory.records, &directory.schools, campus.area_acres);
                    if cli.json {
                        print_json(&stats)?;
                    } else {
                        console::summary(
                            &campus.name,
                            &[
                                ("Faculty", stats.total_faculty.to_string()),
                                ("Schools", stats.total_schools.to_string()),
                                ("Campus area", format!("{} acres", stats.campus_area_acres)),
                            ],
                        );
                    }
                }
                Section::Campus if cli.json => print_json(campus)?,
                Section::Campus => console::summary(
                    &campus.name,
                    &[
                        ("Established", campus.established.to_string()),
                        ("Location", campus.location.clone()),
                        ("Area", format!("{} acres", campus.area_acres)),
                        ("Faculty", campus.total_faculty.clone()),
                    ],
                ),
                Section::Map if cli.json => print_json(&campus.academic_blocks)?,
                Section::Map => {
                    console::header("Academic Blocks");
                    for block in &campus.academic_blocks {
                        console::info(&format!("{} ({} floors)", block.name, block.floors));
                        console::sub_item(&block.facilities.join(", "));
                    }
                }
                Section::Contact => {
                    let items = [
                        ("Address", campus.location.clone()),
                        ("Phone", campus.phone.clone()),
                        ("Fax", campus.fax.clone()),
                        ("Email", campus.email.clone()),
                    ];
                    if cli.json {
                        let map: serde_json::Map<String, serde_json::Value> = items
                            .iter()
                            .map(|(k, v)| (k.to_lowercase(), serde_json::Value::from(v.as_str())))
                            .collect();
                        print_json(&map)?;
                    } else {
                        console::summary("Contact", &items);
                    }
                }
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            let source = pipeline::source_for(&config.dataset.source, &config.dataset)?;
            let enricher = Enricher::from_config(&config);
            let directory = pipeline::load_directory(source.as_ref(), &enricher).await?;
            log::info!(
                "✓ Dataset OK: {} records, {} schools",
                directory.records.len(),
                directory.schools.len()
            );
            for issue in &directory.issues {
                log::warn!("Row {} {:?}: {}", issue.index, issue.kind, issue.reason);
            }

            log::info!("All validations passed!");
        }

        Command::Browse => {
            let toasts = ToastNotifier::new(config.notify.display());
            let directory = load(&config, &toasts).await?;
            let renderer: Box<dyn Renderer> = if cli.json {
                Box::new(JsonRenderer::new(io::stdout()))
            } else {
                Box::new(TextRenderer::new(io::stdout()))
            };
            browse(&config, directory, &toasts, renderer).await?;
        }
    }

    Ok(())
}

/// A decoded stdin line in `browse`.
#[derive(Debug, PartialEq)]
enum Input {
    Event(UiEvent),
    Export(Option<PathBuf>),
    Help,
    Quit,
    Invalid(String),
}

const HELP: &str = "\
Type to search. Commands:
  :school [CODE]          :designation [NAME]   :department [NAME]
  :page N | :next | :prev :open ID | :esc       :key BINDING
  :view home|directory|departments|map|contact  :clear
  :export [PATH]          :help                 :quit";

fn parse_view(name: &str) -> Option<View> {
    match name.to_lowercase().as_str() {
        "home" => Some(View::Home),
        "directory" | "faculty" => Some(View::Directory),
        "departments" | "schools" => Some(View::Departments),
        "map" => Some(View::Map),
        "contact" => Some(View::Contact),
        _ => None,
    }
}

fn optional(arg: &str) -> Option<String> {
    (!arg.is_empty()).then(|| arg.to_string())
}

fn parse_input(line: &str) -> Input {
    let Some(command) = line.strip_prefix(':') else {
        return Input::Event(UiEvent::SearchInput(line.to_string()));
    };
    let (name, arg) = match command.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let event = match name {
        "q" | "quit" => return Input::Quit,
        "help" | "?" => return Input::Help,
        "export" => return Input::Export(optional(arg).map(PathBuf::from)),
        "school" => UiEvent::SchoolFilter(optional(arg)),
        "department" => UiEvent::DepartmentFilter(optional(arg)),
        "designation" if arg.is_empty() => UiEvent::DesignationFilter(None),
        "designation" => match arg.parse::<Designation>() {
            Ok(d) => UiEvent::DesignationFilter(Some(d)),
            Err(e) => return Input::Invalid(e.to_string()),
        },
        "next" => UiEvent::Page(PageTarget::Next),
        "prev" | "previous" => UiEvent::Page(PageTarget::Previous),
        "page" => match arg {
            "next" => UiEvent::Page(PageTarget::Next),
            "prev" | "previous" => UiEvent::Page(PageTarget::Previous),
            n => match n.parse() {
                Ok(n) => UiEvent::Page(PageTarget::Number(n)),
                Err(_) => return Input::Invalid(format!("Invalid page '{}'", n)),
            },
        },
        "open" => match arg.parse() {
            Ok(id) => UiEvent::OpenDetail(id),
            Err(_) => return Input::Invalid(format!("Invalid id '{}'", arg)),
        },
        "esc" | "close" => UiEvent::CloseDetail,
        "key" => match arg.parse::<KeyPress>() {
            Ok(press) => UiEvent::Key(press),
            Err(e) => return Input::Invalid(e.to_string()),
        },
        "clear" => UiEvent::ClearFilters,
        "view" => match parse_view(arg) {
            Some(view) => UiEvent::Navigate(view),
            None => return Input::Invalid(format!("Unknown view '{}'", arg)),
        },
        "select" => UiEvent::SelectSchool(arg.to_string()),
        other => return Input::Invalid(format!("Unknown command ':{}'", other)),
    };
    Input::Event(event)
}

/// Print the latest notification unless it was already shown.
fn show_new_toast(toasts: &ToastNotifier) -> bool {
    let Some(toast) = toasts.take_new() else {
        return false;
    };
    match toast.severity {
        Severity::Info => console::success(&toast.message),
        Severity::Error => console::error(&toast.message),
    }
    true
}

async fn browse(
    config: &Config,
    directory: Directory,
    toasts: &ToastNotifier,
    mut renderer: Box<dyn Renderer>,
) -> Result<()> {
    let (mut session, mut settled) = Session::new(directory, config, toasts)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    console::info(HELP);
    show_new_toast(toasts);
    renderer.render(&session.state().snapshot())?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Input::Event(event) => session.handle(event),
                    Input::Export(path) => {
                        let path = path.unwrap_or_else(|| PathBuf::from(&config.export.file_name));
                        if let Err(e) = session.export_to(&path).await {
                            log::debug!("Export to {} failed: {}", path.display(), e);
                        }
                    }
                    Input::Help => {
                        console::info(HELP);
                        continue;
                    }
                    Input::Quit => break,
                    Input::Invalid(message) => {
                        console::warn(&message);
                        continue;
                    }
                }
            }
            Some(term) = settled.recv() => session.handle(UiEvent::SearchSettled(term)),
        }

        show_new_toast(toasts);
        renderer.render(&session.state().snapshot())?;
    }

    log::info!("Session ended after {} queries", session.evaluations());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory::models::DatasetConfig;

    #[test]
    fn test_plain_text_is_search_input() {
        assert_eq!(
            parse_input("asha "),
            Input::Event(UiEvent::SearchInput("asha ".into()))
        );
    }

    #[test]
    fn test_filter_commands() {
        assert_eq!(
            parse_input(":school SCOPE"),
            Input::Event(UiEvent::SchoolFilter(Some("SCOPE".into())))
        );
        assert_eq!(
            parse_input(":school"),
            Input::Event(UiEvent::SchoolFilter(None))
        );
        assert_eq!(
            parse_input(":designation assistant"),
            Input::Event(UiEvent::DesignationFilter(Some(
                Designation::AssistantProfessor
            )))
        );
        assert!(matches!(parse_input(":designation dean"), Input::Invalid(_)));
    }

    #[test]
    fn test_navigation_commands() {
        assert_eq!(
            parse_input(":page 3"),
            Input::Event(UiEvent::Page(PageTarget::Number(3)))
        );
        assert_eq!(parse_input(":next"), Input::Event(UiEvent::Page(PageTarget::Next)));
        assert_eq!(parse_input(":open 12"), Input::Event(UiEvent::OpenDetail(12)));
        assert_eq!(
            parse_input(":key ctrl+k"),
            Input::Event(UiEvent::Key(KeyPress::ctrl('k')))
        );
        assert_eq!(
            parse_input(":view map"),
            Input::Event(UiEvent::Navigate(View::Map))
        );
        assert!(matches!(parse_input(":page x"), Input::Invalid(_)));
    }

    #[test]
    fn test_filter_args_build_query() {
        let args = FilterArgs {
            search: Some("ab1".into()),
            school: Some("SCOPE".into()),
            designation: Some(Designation::Professor),
            department: None,
        };
        let query = args.to_query();
        assert_eq!(query.search_term, "ab1");
        assert_eq!(query.school_filter.as_deref(), Some("SCOPE"));
        assert_eq!(query.designation_filter, Some(Designation::Professor));
        assert_eq!(query.department_filter, None);
        assert_eq!(query.page, 1);
        assert!(FilterArgs::default().to_query().is_unfiltered());
    }

    #[tokio::test]
    async fn test_toast_is_printed_once() {
        let toasts = ToastNotifier::new(std::time::Duration::from_secs(3));
        toasts.notify("Filters cleared", Severity::Info);
        assert!(show_new_toast(&toasts));
        assert!(!show_new_toast(&toasts));
        assert!(!show_new_toast(&toasts));
    }

    #[tokio::test]
    async fn test_load_failure_toast_shows_before_first_event() {
        let toasts = ToastNotifier::new(std::time::Duration::from_secs(3));
        let config = Config {
            dataset: DatasetConfig {
                source: "/nonexistent/cabins.json".into(),
                ..Default::default()
            },
            ..Config::default()
        };
        let directory = load(&config, &toasts).await.unwrap();
        assert!(directory.is_load_failed());
        assert!(show_new_toast(&toasts));
    }

    #[test]
    fn test_session_commands() {
        assert_eq!(parse_input(":quit"), Input::Quit);
        assert_eq!(parse_input(":export"), Input::Export(None));
        assert_eq!(
            parse_input(":export out.csv"),
            Input::Export(Some(PathBuf::from("out.csv")))
        );
        assert!(matches!(parse_input(":bogus"), Input::Invalid(_)));
    }
}
