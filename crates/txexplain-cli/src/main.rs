use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use alloy::primitives::B256;
use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Context, Result};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;
use txexplain_analysis::analyzers::mev::ACCURACY_DISCLAIMER;
use txexplain_analysis::{Explainer, Explanation};
use txexplain_data::units::{format_native, format_units, wei_to_gwei};
use txexplain_data::{ChainDataSource, ChainProfile, FixtureSource, StaticRegistry};

const DEFAULT_FIXTURES: &str = "data/transactions.json";

#[derive(Debug, Clone)]
struct AppContext {
    fixtures: PathBuf,
    profile: ChainProfile,
}

#[derive(Parser, Debug)]
#[command(name = "tx-explain")]
#[command(about = "Plain-language explanations of EVM transactions")]
#[command(version)]
struct Cli {
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Fixture file of transaction/receipt records. Falls back to
    /// TXEXPLAIN_FIXTURES, then data/transactions.json.
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// JSON chain profile overriding the BSC mainnet defaults.
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Explain a single transaction.
    Explain(ExplainArgs),
    /// Classify every transaction in the fixture file.
    Classify(ClassifyArgs),
    /// List known protocols and tokens.
    Registry,
}

#[derive(Args, Debug)]
struct ExplainArgs {
    /// Transaction hash (0x-prefixed, 32 bytes).
    #[arg(long)]
    hash: String,

    /// Output format: table (default) or json.
    #[arg(long, default_value = "table")]
    output: String,
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    /// Output format: table (default) or json.
    #[arg(long, default_value = "table")]
    output: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet)?;

    let profile = match &cli.profile {
        Some(path) => load_profile(path).await?,
        None => ChainProfile::default(),
    };

    let ctx = AppContext {
        fixtures: cli
            .fixtures
            .or_else(|| std::env::var("TXEXPLAIN_FIXTURES").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURES)),
        profile,
    };

    match cli.command {
        Commands::Explain(args) => handle_explain(&ctx, args).await,
        Commands::Classify(args) => handle_classify(&ctx, args).await,
        Commands::Registry => handle_registry(),
    }
}

fn init_tracing(verbose: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        Level::WARN
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.as_str()))
        .wrap_err("failed to initialize tracing filter")?;

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

async fn load_profile(path: &Path) -> Result<ChainProfile> {
    let json = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("failed to read chain profile {}", path.display()))?;
    let profile: ChainProfile = serde_json::from_str(&json)
        .wrap_err_with(|| format!("invalid chain profile {}", path.display()))?;

    info!(chain = %profile.name, chain_id = profile.chain_id, "loaded chain profile");
    Ok(profile)
}

fn check_output(output: &str) -> Result<()> {
    match output {
        "table" | "json" => Ok(()),
        _ => Err(eyre!("unknown output format '{output}'; use 'table' or 'json'")),
    }
}

async fn handle_explain(ctx: &AppContext, args: ExplainArgs) -> Result<()> {
    let output = args.output.to_lowercase();
    check_output(&output)?;

    let hash: B256 = args
        .hash
        .parse()
        .wrap_err_with(|| format!("invalid transaction hash '{}'", args.hash))?;

    let source = FixtureSource::load(&ctx.fixtures).await?;
    let record = source.get_record(hash).await?.ok_or_else(|| {
        eyre!(
            "transaction {hash} not found in {}",
            ctx.fixtures.display()
        )
    })?;

    let explainer = Explainer::new(StaticRegistry::global(), ctx.profile.clone());
    let explanation = explainer.explain(&record.transaction, &record.receipt);

    match output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&explanation)
                .wrap_err("failed to serialize explanation")?;
            println!("{json}");
        }
        _ => print_explanation(&explanation, &ctx.profile),
    }

    info!(
        %hash,
        tx_type = %explanation.transaction_type,
        output = %output,
        "explain command completed"
    );
    Ok(())
}

fn format_timestamp(timestamp: Option<u64>) -> String {
    timestamp
        .and_then(|secs| i64::try_from(secs).ok())
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_explanation(explanation: &Explanation, profile: &ChainProfile) {
    let symbol = &profile.native_symbol;

    let mut overview = Table::new();
    overview.load_preset(UTF8_BORDERS_ONLY);
    overview.set_header(vec!["Field", "Value"]);
    overview.add_row(vec!["Hash".to_string(), explanation.hash.to_string()]);
    overview.add_row(vec![
        "Type".to_string(),
        format!(
            "{} ({})",
            explanation.transaction_type.label(),
            explanation.transaction_type
        ),
    ]);
    overview.add_row(vec![
        "Status".to_string(),
        if explanation.success { "Success" } else { "Failed" }.to_string(),
    ]);
    overview.add_row(vec![
        "Block".to_string(),
        format!(
            "{} (index {})",
            explanation.block_number, explanation.transaction_index
        ),
    ]);
    overview.add_row(vec![
        "Time".to_string(),
        format_timestamp(explanation.timestamp),
    ]);
    overview.add_row(vec!["From".to_string(), explanation.from.to_string()]);
    overview.add_row(vec![
        "To".to_string(),
        explanation
            .to
            .map(|to| to.to_string())
            .unwrap_or_else(|| "contract creation".to_string()),
    ]);
    overview.add_row(vec![
        "Value".to_string(),
        format!("{} {symbol}", format_native(explanation.value)),
    ]);
    overview.add_row(vec![
        "Fee".to_string(),
        format!(
            "{} {symbol} at {:.2} gwei",
            format_native(explanation.gas_fee_wei),
            wei_to_gwei(explanation.gas_price)
        ),
    ]);
    overview.add_row(vec![
        "Explorer".to_string(),
        profile.tx_url(&explanation.hash.to_string()),
    ]);
    println!("{overview}\n");

    println!("{}\n", explanation.summary);

    if !explanation.token_transfers.is_empty() {
        let mut transfers = Table::new();
        transfers.load_preset(UTF8_BORDERS_ONLY);
        transfers.set_header(vec!["Log", "Token", "From", "To", "Amount"]);
        for transfer in &explanation.token_transfers {
            transfers.add_row(vec![
                transfer.log_index.to_string(),
                transfer.symbol.clone(),
                transfer.from.to_string(),
                transfer.to.to_string(),
                format_units(transfer.amount, transfer.decimals),
            ]);
        }
        println!("Token transfers:\n{transfers}\n");
    }

    let gas = &explanation.gas_analysis;
    let protocol = &explanation.protocol_analysis;
    let risk = &explanation.risk_analysis;
    let network = &explanation.network_impact;

    let mut analysis = Table::new();
    analysis.load_preset(UTF8_BORDERS_ONLY);
    analysis.set_header(vec!["Analysis", "Result"]);
    analysis.add_row(vec![
        "Gas".to_string(),
        format!(
            "{} / {} used ({}%, {})",
            gas.gas_used, gas.gas_limit, gas.gas_efficiency, gas.efficiency_rating
        ),
    ]);
    analysis.add_row(vec![
        "Protocol".to_string(),
        format!(
            "{} [{}] complexity {}",
            protocol.protocol_type,
            protocol.features.join(", "),
            protocol.complexity
        ),
    ]);
    analysis.add_row(vec![
        "Risk".to_string(),
        format!("{} (score {})", risk.risk_level, risk.risk_score),
    ]);
    analysis.add_row(vec![
        "MEV".to_string(),
        match explanation.mev_analysis.mev_type() {
            Some(mev_type) => format!(
                "{mev_type} (confidence {:.1})",
                explanation.mev_analysis.confidence()
            ),
            None => "None detected".to_string(),
        },
    ]);
    analysis.add_row(vec![
        "Network".to_string(),
        format!(
            "{} impact, {:.2}% of block, {}",
            network.impact_level, network.block_contribution, network.network_efficiency
        ),
    ]);
    println!("{analysis}\n");

    let recommendations: Vec<&String> = risk
        .recommendations
        .iter()
        .chain(gas.recommendations.iter())
        .collect();
    if !recommendations.is_empty() {
        println!("Recommendations:");
        for recommendation in recommendations {
            println!("  - {recommendation}");
        }
        println!();
    }

    println!("Learn more:");
    for note in &explanation.educational_content {
        println!("  - {note}");
    }

    if explanation.mev_analysis.is_mev() {
        println!("\nNote: {ACCURACY_DISCLAIMER}");
    }
}

/// One classified transaction for batch output.
#[derive(Debug, serde::Serialize)]
struct ClassifiedRow {
    hash: String,
    transaction_type: String,
    rule: &'static str,
    success: bool,
    risk_level: String,
    mev_suspected: bool,
    gas_efficiency: String,
}

/// Batch output of the `classify` subcommand.
#[derive(Debug, serde::Serialize)]
struct ClassifyReport<'a> {
    transactions: &'a [ClassifiedRow],
    totals: &'a BTreeMap<&'static str, usize>,
    skipped: usize,
}

async fn handle_classify(ctx: &AppContext, args: ClassifyArgs) -> Result<()> {
    let output = args.output.to_lowercase();
    check_output(&output)?;

    let source = FixtureSource::load(&ctx.fixtures).await?;
    if source.is_empty() {
        return Err(eyre!("no records found in {}", ctx.fixtures.display()));
    }

    let explainer = Explainer::new(StaticRegistry::global(), ctx.profile.clone());

    let pb = ProgressBar::new(source.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} txs")
            .wrap_err("failed to create progress style")?
            .progress_chars("#>-"),
    );

    let mut rows = Vec::with_capacity(source.len());
    let mut totals: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut mismatched = 0usize;

    for record in source.records() {
        let (tx, receipt) = (&record.transaction, &record.receipt);
        if !receipt.matches(tx) {
            tracing::warn!(hash = %tx.hash, "receipt does not belong to transaction, skipping");
            mismatched += 1;
            pb.inc(1);
            continue;
        }

        let explanation = explainer.explain(tx, receipt);
        *totals.entry(explanation.transaction_type.tag()).or_default() += 1;

        rows.push(ClassifiedRow {
            hash: explanation.hash.to_string(),
            transaction_type: explanation.transaction_type.tag().to_string(),
            rule: explanation.classification_rule,
            success: explanation.success,
            risk_level: explanation.risk_analysis.risk_level.to_string(),
            mev_suspected: explanation.mev_analysis.is_mev(),
            gas_efficiency: explanation.gas_analysis.gas_efficiency.clone(),
        });
        pb.inc(1);
    }
    pb.finish_and_clear();

    match output.as_str() {
        "json" => {
            let report = ClassifyReport {
                transactions: &rows,
                totals: &totals,
                skipped: mismatched,
            };
            let json = serde_json::to_string_pretty(&report)
                .wrap_err("failed to serialize classification report")?;
            println!("{json}");
        }
        _ => print_classification(&rows, &totals, mismatched),
    }

    info!(
        records = source.len(),
        classified = rows.len(),
        skipped = mismatched,
        "classify command completed"
    );
    Ok(())
}

fn print_classification(
    rows: &[ClassifiedRow],
    totals: &BTreeMap<&'static str, usize>,
    skipped: usize,
) {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Hash", "Type", "Rule", "Status", "Risk", "MEV", "Gas %"]);
    for row in rows {
        table.add_row(vec![
            row.hash.clone(),
            row.transaction_type.clone(),
            row.rule.to_string(),
            if row.success { "ok" } else { "failed" }.to_string(),
            row.risk_level.clone(),
            if row.mev_suspected { "suspected" } else { "-" }.to_string(),
            row.gas_efficiency.clone(),
        ]);
    }
    println!("{table}\n");

    let mut summary = Table::new();
    summary.load_preset(UTF8_BORDERS_ONLY);
    summary.set_header(vec!["Type", "Count"]);
    for (tag, count) in totals {
        summary.add_row(vec![tag.to_string(), count.to_string()]);
    }
    println!("Summary (transactions: {}):\n{summary}", rows.len());

    let suspected = rows.iter().filter(|row| row.mev_suspected).count();
    if suspected > 0 {
        println!("\n{suspected} flagged as potential MEV. {ACCURACY_DISCLAIMER}");
    }
    if skipped > 0 {
        println!("\nSkipped {skipped} record(s) with mismatched receipts.");
    }
}

fn handle_registry() -> Result<()> {
    let registry = StaticRegistry::global();

    let mut protocols = Table::new();
    protocols.load_preset(UTF8_BORDERS_ONLY);
    protocols.set_header(vec!["Protocol", "Address"]);
    for (address, label) in registry.protocols() {
        protocols.add_row(vec![label.to_string(), address.to_string()]);
    }
    println!("{protocols}\n");

    let mut tokens = Table::new();
    tokens.load_preset(UTF8_BORDERS_ONLY);
    tokens.set_header(vec!["Symbol", "Name", "Decimals", "Address"]);
    for (address, info) in registry.tokens() {
        tokens.add_row(vec![
            info.symbol.clone(),
            info.name.clone(),
            info.decimals.to_string(),
            address.to_string(),
        ]);
    }
    println!("{tokens}");

    Ok(())
}
