//! CLI for browsing the payment-operations API from a terminal.

use core::num::NonZeroUsize;
use std::io::{self, Write as _};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, Table};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use payops_rs::client::PayOpsBlockingClient;
use payops_rs::config::Config;
use payops_rs::labels::{
    ADDRESS_PLACEHOLDER, Labeled, PLACEHOLDER, Tone, format_timestamp, group_thousands,
    or_placeholder,
};
use payops_rs::models::{Amount, Merchant, MerchantCode, Payment};
use payops_rs::paginate::Page;
use payops_rs::query::{Filterable, MerchantField, PaymentField, Query};
use payops_rs::stats::DailyTotal;
use payops_rs::view::{ListView, Overview, collect_or_empty};

/// Timestamp layout used in tables.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Widest bar drawn in the daily volume chart.
const CHART_WIDTH: usize = 40;

/// Payment-operations dashboard in the terminal.
#[derive(Debug, Parser)]
#[command(name = "payops", version, about)]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Show summary statistics, daily volume and the latest payments.
    Dashboard {
        /// Number of recent payments to show (default: `PAYOPS_RECENT_COUNT` or 5).
        #[arg(long)]
        recent: Option<usize>,
    },
    /// List payments with optional search and filters.
    Transactions(TransactionArgs),
    /// List merchants with optional search and filters.
    Merchants(MerchantArgs),
    /// Show the details of one merchant.
    Merchant {
        /// Merchant code.
        code: String,
    },
}

/// Page selection shared by the list subcommands.
#[derive(Debug, Args)]
struct PageArgs {
    /// Page to show (1-indexed).
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Rows per page (default: `PAYOPS_PAGE_SIZE` or 10).
    #[arg(long)]
    page_size: Option<NonZeroUsize>,
}

/// Arguments for the `transactions` subcommand.
#[derive(Debug, Args)]
struct TransactionArgs {
    /// Case-insensitive search on payment code and merchant code.
    #[arg(long, short)]
    search: Option<String>,
    /// Status code (PENDING, SUCCESS, FAILED, CANCELLED).
    #[arg(long)]
    status: Option<String>,
    /// Pay type code (ONLINE, DEVICE, MOBILE, VACT, BILLING).
    #[arg(long)]
    pay_type: Option<String>,
    /// Exact merchant code.
    #[arg(long)]
    merchant: Option<String>,
    /// Currency code.
    #[arg(long)]
    currency: Option<String>,
    /// Page selection.
    #[command(flatten)]
    paging: PageArgs,
}

/// Arguments for the `merchants` subcommand.
#[derive(Debug, Args)]
struct MerchantArgs {
    /// Case-insensitive search on merchant name and code.
    #[arg(long, short)]
    search: Option<String>,
    /// Status code (READY, ACTIVE, INACTIVE, CLOSED).
    #[arg(long)]
    status: Option<String>,
    /// Business type code (CAFE, SHOP, MART, APP, TRAVEL, EDU, TEST).
    #[arg(long)]
    biz_type: Option<String>,
    /// Page selection.
    #[command(flatten)]
    paging: PageArgs,
}

/// Normalizes a user-typed enumeration code.
fn code_arg(value: Option<&str>) -> Option<String> {
    value.map(|text| text.trim().to_uppercase())
}

/// Builds the payment query from CLI arguments.
fn payment_query(args: &TransactionArgs) -> Query<PaymentField> {
    let mut query = Query::new();
    query.set_term(args.search.clone().unwrap_or_default());
    query.set_filter(PaymentField::Status, code_arg(args.status.as_deref()));
    query.set_filter(PaymentField::PayType, code_arg(args.pay_type.as_deref()));
    query.set_filter(PaymentField::MerchantCode, args.merchant.clone());
    query.set_filter(PaymentField::Currency, code_arg(args.currency.as_deref()));
    query
}

/// Builds the merchant query from CLI arguments.
fn merchant_query(args: &MerchantArgs) -> Query<MerchantField> {
    let mut query = Query::new();
    query.set_term(args.search.clone().unwrap_or_default());
    query.set_filter(MerchantField::Status, code_arg(args.status.as_deref()));
    query.set_filter(MerchantField::BizType, code_arg(args.biz_type.as_deref()));
    query
}

/// Writes an `error:`-prefixed line to stderr.
fn report_error(message: core::fmt::Arguments<'_>) -> io::Result<()> {
    writeln!(io::stderr().lock(), "{} {message}", "error:".red().bold())
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            report_error(format_args!("{err}"))?;
            writeln!(
                io::stderr().lock(),
                "  {} create a .env file with {}=<api base url>",
                "hint:".cyan(),
                payops_rs::config::BASE_URL_ENV
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let client = match PayOpsBlockingClient::from_config(&config) {
        Ok(client) => client,
        Err(err) => {
            report_error(format_args!("failed to build client: {err}"))?;
            return Ok(ExitCode::FAILURE);
        }
    };

    dispatch(&client, &config, cli.command)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch(
    client: &PayOpsBlockingClient,
    config: &Config,
    command: Command,
) -> io::Result<ExitCode> {
    match command {
        Command::Dashboard { recent } => {
            cmd_dashboard(client, recent.unwrap_or(config.recent_count))
        }
        Command::Transactions(args) => cmd_transactions(client, config, &args),
        Command::Merchants(args) => cmd_merchants(client, config, &args),
        Command::Merchant { code } => cmd_merchant(client, &MerchantCode::new(code)),
    }
}

/// Executes the `dashboard` subcommand.
fn cmd_dashboard(client: &PayOpsBlockingClient, recent: usize) -> io::Result<ExitCode> {
    let spinner = make_spinner("Fetching payments...");
    let payments = collect_or_empty(client.payments(), "payments");
    spinner.finish_and_clear();

    let overview = Overview::from_payments(&payments, recent);
    print_overview(&overview)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `transactions` subcommand.
fn cmd_transactions(
    client: &PayOpsBlockingClient,
    config: &Config,
    args: &TransactionArgs,
) -> io::Result<ExitCode> {
    let spinner = make_spinner("Fetching payments...");
    let payments = collect_or_empty(client.payments(), "payments");
    spinner.finish_and_clear();

    let mut view = ListView::new(payments, args.paging.page_size.unwrap_or(config.page_size));
    view.set_query(payment_query(args));
    select_page(&mut view, args.paging.page)?;
    print_payments_table("Transactions", &view.page())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `merchants` subcommand.
fn cmd_merchants(
    client: &PayOpsBlockingClient,
    config: &Config,
    args: &MerchantArgs,
) -> io::Result<ExitCode> {
    let spinner = make_spinner("Fetching merchants...");
    let merchants = collect_or_empty(client.merchants(), "merchants");
    spinner.finish_and_clear();

    let mut view = ListView::new(merchants, args.paging.page_size.unwrap_or(config.page_size));
    view.set_query(merchant_query(args));
    select_page(&mut view, args.paging.page)?;
    print_merchants_table(&view.page())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `merchant` subcommand.
fn cmd_merchant(client: &PayOpsBlockingClient, code: &MerchantCode) -> io::Result<ExitCode> {
    let spinner = make_spinner("Fetching merchant...");
    let result = client.merchant_detail(code);
    spinner.finish_and_clear();

    match result {
        Ok(Some(merchant)) => {
            print_merchant_detail(&merchant)?;
            Ok(ExitCode::SUCCESS)
        }
        Ok(None) => {
            report_error(format_args!("merchant not found: {code}"))?;
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to fetch merchant");
            report_error(format_args!("failed to fetch merchant {code}: {err}"))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Moves `view` to `page`, warning on stderr when the page does not exist.
fn select_page<T: Filterable>(view: &mut ListView<T>, page: usize) -> io::Result<()> {
    if page != view.current_page() && !view.go_to(page) {
        writeln!(
            io::stderr().lock(),
            "{} page {page} is out of range, showing page {} of {}",
            "warning:".yellow().bold(),
            view.current_page(),
            view.total_pages()
        )?;
    }
    Ok(())
}

// ── Output formatting ────────────────────────────────────────────────

/// Maps a badge tone to a table color.
const fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => Color::Green,
        Tone::Negative => Color::Red,
        Tone::Warning => Color::Yellow,
        Tone::Caution => Color::DarkYellow,
        Tone::Info => Color::Blue,
        Tone::Neutral => Color::Grey,
    }
}

/// Builds a colored badge cell for a labeled value.
fn badge<L: Labeled>(value: &L) -> Cell {
    Cell::new(value.label()).fg(tone_color(value.tone()))
}

/// Formats an amount with thousands separators, or the raw text if it does
/// not parse.
fn amount_text(amount: &Amount) -> String {
    amount
        .try_value()
        .map_or_else(|| amount.to_string(), group_thousands)
}

/// Formats an optional merchant timestamp.
fn optional_time(raw: Option<&str>) -> String {
    let text = or_placeholder(raw, PLACEHOLDER);
    if text == PLACEHOLDER {
        text.to_owned()
    } else {
        format_timestamp(text, TIME_FORMAT)
    }
}

/// Number of bar cells for `amount` on a chart whose largest value is `max`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "value is clamped to [0, width] before the cast"
)]
fn bar_width(amount: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || amount <= 0.0 {
        return 0;
    }
    let scaled = (amount / max * width as f64).round();
    scaled.clamp(0.0, width as f64) as usize
}

/// Creates a table with the shared preset and a cyan header row.
fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(
        headers
            .iter()
            .map(|&header| Cell::new(header).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

/// Appends one payment row to `table`.
fn add_payment_row(table: &mut Table, payment: &Payment) {
    _ = table.add_row(vec![
        Cell::new(&payment.payment_code),
        Cell::new(&payment.merchant_code),
        Cell::new(amount_text(&payment.amount)).set_alignment(CellAlignment::Right),
        Cell::new(&payment.currency),
        badge(&payment.pay_type),
        badge(&payment.status),
        Cell::new(format_timestamp(&payment.payment_at, TIME_FORMAT)),
    ]);
}

/// Column headers of payment tables.
const PAYMENT_HEADERS: &[&str] = &[
    "Payment", "Merchant", "Amount", "Currency", "Pay type", "Status", "Paid at",
];

/// Prints the dashboard: summary, daily volume chart, recent payments.
fn print_overview(overview: &Overview) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let summary = &overview.summary;

    writeln!(out, "{}", "Dashboard".green().bold())?;
    writeln!(out)?;

    let mut cards = new_table(&["Metric", "Value"]);
    _ = cards.add_row(vec![
        Cell::new("Successful volume"),
        Cell::new(group_thousands(summary.total_amount)).fg(Color::Green),
    ]);
    _ = cards.add_row(vec![
        Cell::new("Payments"),
        Cell::new(summary.total_count),
    ]);
    _ = cards.add_row(vec![
        Cell::new("Successful"),
        Cell::new(summary.success_count),
    ]);
    let fail_cell = Cell::new(format!("{:.1}%", summary.fail_rate_percent));
    _ = cards.add_row(vec![
        Cell::new("Fail rate"),
        if summary.fail_rate_percent > 0.0 {
            fail_cell.fg(Color::Red)
        } else {
            fail_cell.fg(Color::DarkGrey)
        },
    ]);
    writeln!(out, "{cards}")?;
    writeln!(out)?;

    print_daily_chart(&mut out, &overview.daily)?;
    writeln!(out)?;

    writeln!(
        out,
        "{} {}",
        "Recent payments".green().bold(),
        format_args!("({})", overview.recent.len()).dimmed()
    )?;
    if overview.recent.is_empty() {
        writeln!(out, "{}", "No payments found.".dimmed())?;
        return Ok(());
    }
    let mut table = new_table(PAYMENT_HEADERS);
    for payment in &overview.recent {
        add_payment_row(&mut table, payment);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints successful volume per date as a horizontal bar chart.
fn print_daily_chart<W: io::Write>(out: &mut W, daily: &[DailyTotal]) -> io::Result<()> {
    writeln!(out, "{}", "Daily volume".green().bold())?;
    if daily.is_empty() {
        writeln!(out, "{}", "No successful payments.".dimmed())?;
        return Ok(());
    }
    let max = daily.iter().map(|bucket| bucket.amount).fold(0.0_f64, f64::max);
    let mut table = new_table(&["Date", "Amount", ""]);
    for bucket in daily {
        _ = table.add_row(vec![
            Cell::new(&bucket.date),
            Cell::new(group_thousands(bucket.amount)).set_alignment(CellAlignment::Right),
            Cell::new("\u{2588}".repeat(bar_width(bucket.amount, max, CHART_WIDTH)))
                .fg(Color::Cyan),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints the "page X of Y" footer of a list.
fn print_page_footer<W: io::Write, I>(out: &mut W, page: &Page<I>) -> io::Result<()> {
    if page.needs_navigation() {
        writeln!(
            out,
            "{}",
            format_args!("page {} of {}", page.number, page.total_pages).dimmed()
        )?;
    }
    Ok(())
}

/// Prints one page of payments in a table.
fn print_payments_table(title: &str, page: &Page<Vec<&Payment>>) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if page.total_items == 0 {
        writeln!(out, "{}", "No payments found.".dimmed())?;
        return Ok(());
    }

    let mut table = new_table(PAYMENT_HEADERS);
    for payment in &page.items {
        add_payment_row(&mut table, payment);
    }

    writeln!(
        out,
        "{} {}",
        title.green().bold(),
        format_args!("({})", page.total_items).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    print_page_footer(&mut out, page)
}

/// Prints one page of merchants in a table.
fn print_merchants_table(page: &Page<Vec<&Merchant>>) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if page.total_items == 0 {
        writeln!(out, "{}", "No merchants found.".dimmed())?;
        return Ok(());
    }

    let mut table = new_table(&["Code", "Name", "Business", "Status", "Registered"]);
    for merchant in &page.items {
        _ = table.add_row(vec![
            Cell::new(&merchant.merchant_code),
            Cell::new(&merchant.merchant_name),
            badge(&merchant.biz_type),
            badge(&merchant.status),
            Cell::new(optional_time(merchant.registered_at.as_deref())),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Merchants".green().bold(),
        format_args!("({})", page.total_items).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    print_page_footer(&mut out, page)
}

/// Prints every attribute of a merchant.
fn print_merchant_detail(merchant: &Merchant) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let mut table = new_table(&["Field", "Value"]);
    let rows: [(&str, Cell); 10] = [
        ("Code", Cell::new(&merchant.merchant_code)),
        ("Name", Cell::new(&merchant.merchant_name)),
        ("Status", badge(&merchant.status)),
        ("Business", badge(&merchant.biz_type)),
        (
            "Business no.",
            Cell::new(or_placeholder(merchant.biz_no.as_deref(), PLACEHOLDER)),
        ),
        (
            "Address",
            Cell::new(or_placeholder(merchant.address.as_deref(), ADDRESS_PLACEHOLDER)),
        ),
        (
            "Phone",
            Cell::new(or_placeholder(merchant.phone.as_deref(), PLACEHOLDER)),
        ),
        (
            "Email",
            Cell::new(or_placeholder(merchant.email.as_deref(), PLACEHOLDER)),
        ),
        (
            "Registered",
            Cell::new(optional_time(merchant.registered_at.as_deref())),
        ),
        (
            "Updated",
            Cell::new(optional_time(merchant.updated_at.as_deref())),
        ),
    ];
    for (name, value) in rows {
        _ = table.add_row(vec![Cell::new(name).fg(Color::DarkGrey), value]);
    }

    writeln!(out, "{}", merchant.merchant_name.green().bold())?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Creates a spinner with the given message.
fn make_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(core::time::Duration::from_millis(80));
    spinner
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
