//! Command-line probe for the event dashboard core.
//!
//! # Responsibility
//! - Exercise normalization offline (`parse-time`, `parse-entries`).
//! - Drive the list controllers, detail pages and the person lookup against a
//!   live API.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use eventscope_core::{
    decode_query, parse_timestamp, ClientConfig, ClusterDetailView, ClusterSummary, ClusterView,
    Completion, CrossReferenceDispatcher, DetailState, DisplayTime, EventDetailView, EventRecord,
    EventView, HttpClient, ListDefinition, ListSource, PersonAnalysisRecord, PersonAnalysisView,
    PersonCriteria, PersonId, QueryController, RecordService, CALLER_LABELS, CLUSTER_LIST,
    EVENT_LIST, PARTY_LABELS, PERSON_ANALYSIS_LIST,
};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "eventscope", version, about, long_about = None)]
struct Cli {
    /// Write rolling logs into this directory.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[arg(long, global = true, default_value = eventscope_core::default_log_level())]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the core version.
    Version,
    /// Normalize one or more raw timestamps.
    ParseTime { raw: Vec<String> },
    /// Parse a caller or party string into entries.
    ParseEntries {
        #[arg(long, value_enum, default_value_t = EntryKind::Party)]
        kind: EntryKind,
        raw: String,
    },
    /// List events; `query` is an address-bar style query string.
    Events {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        search: Option<String>,
    },
    /// List event clusters.
    Clusters {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Show one event with normalized participants.
    Event { event_id: String },
    /// Show one cluster with its timeline.
    Cluster { cluster_uid: String },
    /// List phone-keyed participant aggregates.
    Analysis {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Show the event history of one phone number.
    AnalysisDetail { phone: String },
    /// Print the filter choices offered by the service.
    Options,
    /// Search the person registry.
    People {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        id_card: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one registry entry.
    Person { person_id: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EntryKind {
    Caller,
    Party,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(dir) = cli.log_dir.as_deref() {
        eventscope_core::init_logging(&cli.log_level, dir).context("logging init failed")?;
    }

    match cli.command {
        Command::Version => {
            println!("eventscope_core version={}", eventscope_core::core_version());
        }
        Command::ParseTime { raw } => {
            for value in raw {
                let time = DisplayTime::parse(value.as_str());
                let status = if parse_timestamp(&value).is_some() {
                    "ok"
                } else {
                    "raw"
                };
                println!("{status}\t{}\t{}", time.full(), time.short());
            }
        }
        Command::ParseEntries { kind, raw } => {
            let labels = match kind {
                EntryKind::Caller => &CALLER_LABELS,
                EntryKind::Party => &PARTY_LABELS,
            };
            for entry in labels.parse(Some(raw.as_str())) {
                println!("{}", serde_json::to_string(&entry)?);
            }
        }
        Command::Events { query, search } => {
            let (client, config) = connect()?;
            let mut controller =
                QueryController::<EventRecord>::new(&EVENT_LIST, config.list_page_size);
            let mut ticket = controller.load(&decode_query(&query));
            if let Some(text) = search {
                ticket = controller.quick_search(&text);
            }
            let outcome = ticket.execute::<EventRecord, _>(&client).await;
            settle(controller.complete(outcome))?;
            print_location(&controller);
            if let Some(page) = controller.results() {
                println!("total={} page={}/{}", page.total, page.page, page.page_count());
                for view in page.items.iter().cloned().map(EventView::from_record) {
                    println!(
                        "{}\t{}\t{}\t{}",
                        view.record.event_id,
                        view.reported_at.full(),
                        view.record.town,
                        view.callers_text().replace('\n', "; ")
                    );
                }
            }
        }
        Command::Clusters { query } => {
            let (client, config) = connect()?;
            let controller = run_list::<ClusterSummary, _>(
                &client,
                &CLUSTER_LIST,
                config.list_page_size,
                &query,
            )
            .await?;
            if let Some(page) = controller.results() {
                println!("total={} page={}/{}", page.total, page.page, page.page_count());
                for view in page.items.iter().cloned().map(ClusterView::from_record) {
                    println!(
                        "{}\t{}\t{}\t{} ~ {}",
                        view.record.cluster_uid,
                        view.record.record_count,
                        view.duration_text(),
                        view.first_report.short(),
                        view.last_report.short()
                    );
                }
            }
        }
        Command::Event { event_id } => {
            let (client, _) = connect()?;
            let state = DetailState::from_result(
                "获取事件详情失败",
                client.event_detail(&event_id).await,
            )
            .map(EventDetailView::from_record);
            if let Some(view) = loaded(state, &format!("event {event_id}"))? {
                println!("{} {}", view.record.event_id, view.reported_at.full());
                for entry in &view.callers {
                    println!("caller\t{}", CALLER_LABELS.display(entry));
                }
                for entry in &view.parties {
                    println!("party\t{}", PARTY_LABELS.display(entry));
                }
            }
        }
        Command::Cluster { cluster_uid } => {
            let (client, _) = connect()?;
            let state = DetailState::from_result(
                "获取聚合事件详情失败",
                client.cluster_detail(&cluster_uid).await,
            )
            .map(ClusterDetailView::from_record);
            if let Some(view) = loaded(state, &format!("cluster {cluster_uid}"))? {
                println!(
                    "{}\t{} ~ {}\tparticipants={} phones={}",
                    view.cluster_uid,
                    view.first_report.full(),
                    view.last_report.full(),
                    view.participant_count,
                    view.distinct_phones()
                );
                for step in &view.timeline {
                    println!(
                        "{}\t{}\t{}",
                        step.reported_at.short(),
                        step.entry.event_id,
                        step.entry.description
                    );
                }
            }
        }
        Command::Analysis { query } => {
            let (client, config) = connect()?;
            let controller = run_list::<PersonAnalysisRecord, _>(
                &client,
                &PERSON_ANALYSIS_LIST,
                config.list_page_size,
                &query,
            )
            .await?;
            if let Some(page) = controller.results() {
                println!("total={} page={}/{}", page.total, page.page, page.page_count());
                for row in &page.items {
                    println!(
                        "{}\t{}\t{}\t{}",
                        row.phone,
                        row.name.as_deref().unwrap_or("-"),
                        row.primary_role.as_deref().unwrap_or("-"),
                        row.event_count
                    );
                }
            }
        }
        Command::AnalysisDetail { phone } => {
            let (client, _) = connect()?;
            let state = DetailState::from_result(
                "获取人员详情失败",
                client.person_analysis_detail(&phone).await,
            )
            .map(PersonAnalysisView::from_record);
            if let Some(view) = loaded(state, &format!("phone {phone}"))? {
                println!(
                    "{}\t{}\t{}\tevents={}",
                    view.record.phone,
                    view.name_text(),
                    view.id_card_text(),
                    view.record.event_count
                );
                println!("names: {}", view.name_candidates_text());
                println!("id cards: {}", view.id_candidates_text());
                for event in &view.events {
                    let status = if event.is_closed() { "已办结" } else { "处理中" };
                    println!(
                        "{}\t{}\t{}\t{}",
                        event.reported_at.short(),
                        event.entry.event_id,
                        status,
                        event.resolution().unwrap_or("-")
                    );
                }
            }
        }
        Command::Options => {
            let (client, _) = connect()?;
            let events = client.filter_options().await?;
            let clusters = client.cluster_filter_options().await?;
            let roles = client.person_roles().await?;
            println!("towns: {}", events.towns.join(", "));
            println!("levels: {}", events.levels.join(", "));
            println!("categories: {}", events.categories.join(", "));
            println!("related events: {}", events.related_event_options.join(", "));
            println!("event counts: {}", clusters.event_count_ranges.join(", "));
            println!("durations: {}", clusters.duration_ranges.join(", "));
            println!("roles: {}", roles.join(", "));
        }
        Command::People {
            name,
            phone,
            id_card,
            page,
        } => {
            let (client, config) = connect()?;
            let mut dispatcher = CrossReferenceDispatcher::new(config.lookup_page_size);
            let criteria =
                PersonCriteria::new(name.as_deref(), phone.as_deref(), id_card.as_deref());
            dispatcher.open(PersonCriteria::default());
            let ticket = dispatcher.search(criteria, page);
            let outcome = ticket.execute(&client).await;
            settle(dispatcher.complete_search(outcome))?;
            if let Some(result) = dispatcher.result() {
                println!("total={} page={}/{}", result.total, result.page, result.page_count());
                for person in &result.items {
                    println!(
                        "{}\t{}\t{}\t{}",
                        person.person_id, person.name, person.phone, person.id_card
                    );
                }
            }
        }
        Command::Person { person_id } => {
            let (client, config) = connect()?;
            let mut dispatcher = CrossReferenceDispatcher::new(config.lookup_page_size);
            let ticket = dispatcher.fetch_detail(PersonId::new(person_id));
            let outcome = ticket.execute(&client).await;
            settle(dispatcher.complete_detail(outcome))?;
            if let Some(person) = dispatcher.detail() {
                println!("{}", serde_json::to_string_pretty(person)?);
            }
        }
    }
    Ok(())
}

fn connect() -> Result<(HttpClient, ClientConfig)> {
    let config = ClientConfig::from_env().context("invalid EVENTSCOPE_* configuration")?;
    info!("event=cli_connect module=cli status=ok base_url={}", config.base_url);
    let client = HttpClient::new(config.clone())?;
    Ok((client, config))
}

async fn run_list<T, S>(
    source: &S,
    definition: &'static ListDefinition,
    page_size: u32,
    query: &str,
) -> Result<QueryController<T>>
where
    S: ListSource<T>,
{
    let mut controller = QueryController::new(definition, page_size);
    let ticket = controller.load(&decode_query(query));
    let outcome = ticket.execute::<T, S>(source).await;
    settle(controller.complete(outcome))?;
    print_location(&controller);
    Ok(controller)
}

fn print_location<T>(controller: &QueryController<T>) {
    let location = controller.state().to_query_string();
    if !location.is_empty() {
        println!("?{location}");
    }
}

fn loaded<T>(state: DetailState<T>, what: &str) -> Result<Option<T>> {
    match state {
        DetailState::Loaded(value) => Ok(Some(value)),
        DetailState::NotFound => bail!("{what} not found"),
        DetailState::Failed(notice) => bail!(notice.message),
        DetailState::Loading => Ok(None),
    }
}

fn settle(completion: Completion) -> Result<()> {
    match completion {
        Completion::Failed(notice) => bail!(notice.message),
        Completion::Applied | Completion::Superseded => Ok(()),
    }
}
