use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::builder::PossibleValuesParser;
use clap::Parser;

use cardtrader_dashboard::queries::BestPriceParams;
use cardtrader_dashboard::render::{self, DashboardContext};
use cardtrader_dashboard::report::ExpansionReport;
use cardtrader_dashboard::{config, CardTraderError, CardTraderSdk, Condition, ListingFields, Result};

/// Summarize CardTrader marketplace prices for one expansion.
///
/// The API token is read from CARDTRADER_TOKEN (or jwt).
#[derive(Parser, Debug)]
#[command(name = "cardtrader-dashboard", version, about)]
struct Args {
    /// Game display name or internal name [default: Pokémon]
    #[arg(long)]
    game: Option<String>,

    /// Expansion name or code [default: Base Set]
    #[arg(long)]
    expansion: Option<String>,

    /// Listing language
    #[arg(long, default_value = config::DEFAULT_LANGUAGE,
          value_parser = PossibleValuesParser::new(config::LANGUAGES))]
    language: String,

    /// Worst acceptable condition, e.g. "Slightly Played" or slightly-played
    #[arg(long, default_value = "Near Mint", value_parser = parse_condition)]
    min_condition: Condition,

    /// Only price listings fulfilled through the hub
    #[arg(long)]
    hub_only: bool,

    /// Rows in the top-N table
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..=50))]
    top: u16,

    /// Flat listing key holding the card language
    #[arg(long, default_value = config::DEFAULT_LANGUAGE_FIELD)]
    language_field: String,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    #[arg(long, default_value = config::API_BASE)]
    base_url: String,

    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// List games and exit
    #[arg(long)]
    list_games: bool,

    /// List the selected game's expansions and exit
    #[arg(long)]
    list_expansions: bool,
}

fn parse_condition(s: &str) -> std::result::Result<Condition, String> {
    s.parse().map_err(|e: CardTraderError| e.to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let sdk = CardTraderSdk::builder()
        .token_from_env()?
        .base_url(&args.base_url)
        .timeout(Duration::from_secs(args.timeout_secs))
        .listing_fields(ListingFields::with_language_field(&args.language_field))
        .build()?;

    let mut out = io::stdout().lock();

    if args.list_games {
        for game in sdk.games().list()? {
            writeln!(out, "{:>6}  {:<24} {}", game.id, game.name, game.display_name)?;
        }
        return Ok(());
    }

    let game = match &args.game {
        Some(query) => sdk
            .games()
            .find(query)?
            .ok_or_else(|| CardTraderError::NotFound(format!("game '{}'", query)))?,
        None => sdk.games().default_game()?,
    };

    if args.list_expansions {
        for expansion in sdk.expansions().for_game(game.id)? {
            writeln!(
                out,
                "{:>6}  {:<10} {}",
                expansion.id,
                expansion.code.as_deref().unwrap_or("-"),
                expansion.name
            )?;
        }
        return Ok(());
    }

    let expansion = match &args.expansion {
        Some(name) => sdk.expansions().get_by_name(game.id, name)?.ok_or_else(|| {
            CardTraderError::NotFound(format!("expansion '{}' in {}", name, game.display_name))
        })?,
        None => sdk.expansions().default_for_game(game.id)?,
    };

    let params = BestPriceParams::new(expansion.id, args.language.clone())
        .min_condition(args.min_condition)
        .hub_only(args.hub_only);
    let result = sdk.cards().best_prices(&params)?;
    let report = ExpansionReport::new(&result);
    let top_n = usize::from(args.top);

    if args.json {
        serde_json::to_writer_pretty(&mut out, &report.summary(top_n))?;
        writeln!(out)?;
    } else {
        let ctx = DashboardContext {
            game: game.display_name.clone(),
            expansion: expansion.name.clone(),
            language: args.language.clone(),
            min_condition: args.min_condition,
            hub_only: args.hub_only,
        };
        render::render_dashboard(&mut out, &ctx, &report, top_n)?;
    }
    Ok(())
}
