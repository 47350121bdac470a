// src/cli/dashboard.rs
// Sync, view, summary and export commands over the live sheet tabs

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};

use super::{CliError, FilterArgs, RangeArgs};
use crate::ai::{self, api_key::resolve_api_key, GlobalSummary, SummaryPayload};
use crate::auth::{AuthError, AuthService, MainView, UserRepository};
use crate::settings::AppSettings;
use crate::sheets::badges::{cell_display, record_status, StatusBadge};
use crate::sheets::filters::RecordFilter;
use crate::sheets::views::charts::Bucket;
use crate::sheets::views::important::is_overdue;
use crate::sheets::views::{display_columns, DomainView, GlobalView, ImportantFilterOptions};
use crate::sheets::{DashboardStore, Domain, DomainState, HttpSheetFetcher, ParsedSheet, Record};

const CELL_WIDTH: usize = 18;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Fetches `domains` into a fresh store. All four run concurrently.
async fn load(settings: &AppSettings, domains: &[Domain]) -> Result<DashboardStore, CliError> {
    let fetcher = HttpSheetFetcher::new(
        settings.spreadsheet_export_url.clone(),
        settings.request_timeout(),
    )?;
    let store = DashboardStore::new(settings.tabs.tab_map());
    if domains.len() == Domain::ALL.len() {
        store.refresh_all(&fetcher).await;
    } else {
        for domain in domains {
            store.refresh(&fetcher, *domain).await;
        }
    }
    Ok(store)
}

/// Loaded sheet for `domain`, or the domain's fetch error.
fn loaded_sheet(store: &DashboardStore, domain: Domain) -> Result<Arc<ParsedSheet>, CliError> {
    match store.state(domain) {
        DomainState::Loaded(sheet) => Ok(sheet),
        DomainState::Failed(source) => Err(CliError::Sheet {
            domain: domain.label().to_string(),
            source,
        }),
        DomainState::NotLoaded => Ok(Arc::new(ParsedSheet::empty())),
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn badge_label(badge: StatusBadge) -> &'static str {
    match badge {
        StatusBadge::Closed => "[closed]",
        StatusBadge::Wip => "[wip]",
        StatusBadge::Pending => "[pending]",
        StatusBadge::Other | StatusBadge::Empty => "",
    }
}

fn print_buckets(title: &str, buckets: &[Bucket]) {
    if buckets.is_empty() {
        return;
    }
    println!("\n{}", title);
    for b in buckets {
        println!("  {:<28} {}", clip(&b.label, 28), b.count);
    }
}

fn print_stats(view: &DomainView) {
    match view {
        DomainView::Social(v) => {
            println!("Total: {}  Closed: {}  WIP: {}", v.total, v.closed, v.wip);
            print_buckets("Status mix", &v.status_mix);
            print_buckets("Daily volume", &v.trend);
            print_buckets("TAT distribution", &v.tat_buckets);
        }
        DomainView::Proxy(v) => {
            println!(
                "Total: {}  Intro verified: {}  Associates: {}",
                v.total, v.intro_verified, v.associates
            );
            print_buckets("Workload by owner", &v.owner_mix);
            print_buckets("Status mix", &v.status_mix);
            print_buckets("Introduction found", &v.intro_mix);
            print_buckets("Daily volume", &v.trend);
        }
        DomainView::Legal(v) => {
            println!(
                "Total: {}  Closed: {}  WIP: {}  Avg TAT: {:.1}",
                v.total, v.closed, v.wip, v.avg_tat
            );
            print_buckets("By type", &v.type_mix);
            print_buckets("Daily volume", &v.trend);
        }
        DomainView::Important(v) => {
            println!(
                "Total: {}  Closed: {}  WIP: {}  Overdue: {}",
                v.total, v.closed, v.wip, v.overdue
            );
            print_buckets("By team", &v.team_mix);
            print_buckets("Status mix", &v.status_mix);
        }
    }
}

fn print_table(domain: Domain, columns: &[String], rows: &[&Record], today: NaiveDate) {
    println!();
    let header: Vec<String> = columns
        .iter()
        .map(|c| format!("{:<width$}", clip(c, CELL_WIDTH), width = CELL_WIDTH))
        .collect();
    println!("  {}", header.join(" "));
    println!("{}", "-".repeat((CELL_WIDTH + 1) * columns.len() + 2));
    for record in rows {
        let marker = if domain == Domain::Important && is_overdue(record, today) {
            "! "
        } else {
            "  "
        };
        let cells: Vec<String> = columns
            .iter()
            .map(|c| {
                let value = record.value(c);
                let shown = if c == domain.status_column() {
                    let badge = badge_label(record_status(domain, record));
                    format!("{} {}", cell_display(value), badge).trim_end().to_string()
                } else {
                    cell_display(value).to_string()
                };
                format!("{:<width$}", clip(&shown, CELL_WIDTH), width = CELL_WIDTH)
            })
            .collect();
        println!("{}{}", marker, cells.join(" "));
    }
    if rows.is_empty() {
        println!("  No records match the current filters.");
    }
}

pub async fn sync<R: UserRepository>(
    settings: &AppSettings,
    auth: &AuthService<R>,
    only: Option<Domain>,
) -> Result<(), CliError> {
    let user = auth.current_user()?.ok_or(AuthError::NotLoggedIn)?;
    let domains: Vec<Domain> = match only {
        Some(domain) => {
            auth.require(MainView::for_domain(domain))?;
            vec![domain]
        }
        None => Domain::ALL
            .into_iter()
            .filter(|d| user.can_access(MainView::for_domain(*d)))
            .collect(),
    };
    let store = load(settings, &domains).await?;

    println!("{:<20} {:<10} {:<8} {}", "Domain", "State", "Records", "Detail");
    println!("{}", "-".repeat(72));
    let mut failed = 0;
    for domain in &domains {
        match store.state(*domain) {
            DomainState::Loaded(sheet) => {
                let synced = store
                    .last_synced(*domain)
                    .map(|t| t.format("%H:%M:%S").to_string())
                    .unwrap_or_default();
                println!(
                    "{:<20} {:<10} {:<8} synced {}",
                    domain.label(),
                    "ok",
                    sheet.records.len(),
                    synced
                );
            }
            DomainState::Failed(e) => {
                failed += 1;
                let hint = if e.is_retryable() { " (retry with `dashly sync`)" } else { "" };
                println!("{:<20} {:<10} {:<8} {}{}", domain.label(), "failed", "-", e, hint);
            }
            DomainState::NotLoaded => {
                println!("{:<20} {:<10} {:<8}", domain.label(), "skipped", "-");
            }
        }
    }
    if failed > 0 {
        return Err(CliError::SyncFailed { failed });
    }
    Ok(())
}

#[derive(Serialize)]
struct ViewReport<'a> {
    domain: Domain,
    range: String,
    stats: &'a DomainView,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter_options: Option<ImportantFilterOptions>,
    columns: &'a [String],
    rows: &'a [&'a Record],
}

pub async fn view<R: UserRepository>(
    settings: &AppSettings,
    auth: &AuthService<R>,
    domain: Domain,
    filters: &FilterArgs,
    json: bool,
) -> Result<(), CliError> {
    auth.require(MainView::for_domain(domain))?;
    let store = load(settings, &[domain]).await?;
    let sheet = loaded_sheet(&store, domain)?;
    let today = today();
    let filter = filters.record_filter(domain)?;
    let rows = filter.apply(domain, &sheet.records, today);
    let stats = DomainView::build(domain, &rows, today);
    let columns = display_columns(domain, &sheet);
    let filter_options = (domain == Domain::Important).then(|| {
        let all: Vec<&Record> = sheet.records.iter().collect();
        ImportantFilterOptions::from_records(&all)
    });

    if json {
        let report = ViewReport {
            domain,
            range: filter.range.label(),
            stats: &stats,
            filter_options,
            columns: &columns,
            rows: &rows,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} ({})", domain.label(), filter.range.label());
    if let Some(synced) = store.last_synced(domain) {
        println!("Last synced: {}", synced.format("%Y-%m-%d %H:%M:%S"));
    }
    print_stats(&stats);
    if let Some(options) = &filter_options {
        println!("\nTeams: {}", options.teams.join(", "));
        println!("Owners: {}", options.owners.join(", "));
        println!("Statuses: {}", options.statuses.join(", "));
    }
    print_table(domain, &columns, &rows, today);
    Ok(())
}

#[derive(Serialize)]
struct SummaryReport<'a> {
    range: String,
    global: &'a GlobalView,
    ai: Option<&'a GlobalSummary>,
}

pub async fn summary<R: UserRepository>(
    settings: &AppSettings,
    auth: &AuthService<R>,
    range: &RangeArgs,
    json: bool,
) -> Result<(), CliError> {
    auth.require(MainView::GlobalSummary)?;
    let store = load(settings, &Domain::ALL).await?;
    let today = today();
    let filter = RecordFilter::for_summary(range.date_range());

    let mut sheets: HashMap<Domain, Arc<ParsedSheet>> = HashMap::new();
    for domain in Domain::ALL {
        let sheet = match loaded_sheet(&store, domain) {
            Ok(sheet) => sheet,
            Err(e) => {
                warn!("{}; counted as empty", e);
                Arc::new(ParsedSheet::empty())
            }
        };
        sheets.insert(domain, sheet);
    }
    let filtered: Vec<(Domain, Vec<&Record>)> = Domain::ALL
        .into_iter()
        .map(|d| (d, filter.apply(d, &sheets[&d].records, today)))
        .collect();

    let global = GlobalView::build(&filtered);
    let payload = SummaryPayload::build(filter.range.label(), settings.summary_sample_size, |d| {
        filtered
            .iter()
            .find(|(domain, _)| *domain == d)
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default()
    });
    let summary = ai::generate_global_summary(settings, resolve_api_key(), &payload).await;

    if json {
        let report = SummaryReport {
            range: filter.range.label(),
            global: &global,
            ai: summary.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Executive summary ({})", filter.range.label());
    println!(
        "Total items: {}  Closed: {}  Resolution rate: {}%",
        global.total_items, global.total_closed, global.resolution_rate
    );
    print_buckets("Volume by domain", &global.volume_distribution);
    println!("\n{:<20} {:<10} {}", "Domain", "Resolved", "WIP");
    for c in &global.resolution_comparison {
        println!("{:<20} {:<10} {}", c.domain.label(), c.resolved, c.wip);
    }
    match summary {
        Some(s) => {
            println!("\nStatus: {:?}", s.status_color);
            println!("{}", s.executive_summary);
            println!("\n  Social Media: {}", s.departmental_deep_dive.social);
            println!("  Proxy: {}", s.departmental_deep_dive.proxy);
            println!("  Legal: {}", s.departmental_deep_dive.legal);
            println!("  Important Threads: {}", s.departmental_deep_dive.important);
            println!("\nKey priorities:");
            for p in &s.key_priorities {
                println!("  - {}", p);
            }
        }
        None => println!("\nAI summary unavailable."),
    }
    Ok(())
}

pub async fn export<R: UserRepository>(
    settings: &AppSettings,
    auth: &AuthService<R>,
    domain: Domain,
    out: &Path,
    filters: &FilterArgs,
) -> Result<(), CliError> {
    auth.require(MainView::for_domain(domain))?;
    let store = load(settings, &[domain]).await?;
    let sheet = loaded_sheet(&store, domain)?;
    let rows = filters.record_filter(domain)?.apply(domain, &sheet.records, today());
    let columns = display_columns(domain, &sheet);
    let written = write_rows(out, &columns, &rows)?;
    info!("Exported {} {} rows to {:?}", written, domain, out);
    println!("Exported {} rows to {}", written, out.display());
    Ok(())
}

/// Writes `columns` of each row; missing cells are written empty.
fn write_rows(out: &Path, columns: &[String], rows: &[&Record]) -> Result<usize, CliError> {
    let mut writer = ::csv::Writer::from_path(out)?;
    writer.write_record(columns)?;
    for record in rows {
        writer.write_record(columns.iter().map(|c| record.value(c)))?;
    }
    writer.flush()?;
    Ok(rows.len())
}
