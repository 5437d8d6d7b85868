use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use eyre::{eyre, WrapErr};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, warn};

use cosmos_sign_adapters::{
    ChainRegistryAdapter, InMemoryQueriesAdapter, InteractionQueueAdapter, LcdQueriesAdapter,
    SignAdapterConfig, StaticInteractionContext,
};
use cosmos_sign_core::units::parse_int;
use cosmos_sign_core::{
    ChainInfoPort, InteractionQueuePort, InteractionResult, Orchestrator, QueriesPort,
    SessionError, SignInteractionData, SignTxSession,
};

use crate::cli::Cli;

pub type CliOrchestrator = Orchestrator<InteractionQueueAdapter, StaticInteractionContext>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSummary {
    pub approved: usize,
    pub rejected: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceEntry {
    chain_id: String,
    address: String,
    denom: String,
    amount: String,
}

pub fn run(cli: &Cli) -> eyre::Result<ReviewSummary> {
    let cfg = cli.adapter_config();
    let registry_path = cfg
        .chain_registry_path
        .clone()
        .ok_or_else(|| eyre!("no chain registry: pass --chains or set COSMOS_SIGN_CHAIN_REGISTRY"))?;
    let chains = Arc::new(ChainRegistryAdapter::from_json_file(&registry_path)?);
    info!(chains = ?chains.chain_ids(), "loaded chain registry");

    let requests: Vec<SignInteractionData> = read_json(&cli.requests)?;
    let queries = load_queries(cli, &cfg, Arc::<ChainRegistryAdapter>::clone(&chains), &requests)?;

    let queue = InteractionQueueAdapter::new();
    for data in requests {
        queue.push(data)?;
    }
    let orch = Orchestrator::new(
        chains,
        queries,
        queue,
        StaticInteractionContext::external_popup(),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    review(&orch, cli, &mut out)
}

fn load_queries(
    cli: &Cli,
    cfg: &SignAdapterConfig,
    chains: Arc<dyn ChainInfoPort>,
    requests: &[SignInteractionData],
) -> eyre::Result<Arc<dyn QueriesPort>> {
    if cli.lcd {
        let lcd = LcdQueriesAdapter::with_config(chains, cfg)?;
        for data in requests {
            if let Err(e) = lcd.refresh_balances(&data.chain_id, &data.signer) {
                warn!(chain_id = %data.chain_id, signer = %data.signer, error = %e, "balance fetch failed");
            }
        }
        return Ok(Arc::new(lcd));
    }

    let store = InMemoryQueriesAdapter::new();
    match &cli.balances {
        Some(path) => {
            let entries: Vec<BalanceEntry> = read_json(path)?;
            for e in &entries {
                let amount = parse_int(&e.amount)
                    .wrap_err_with(|| format!("balance of {} for {}", e.denom, e.address))?;
                store.set_balance(&e.chain_id, &e.address, &e.denom, amount)?;
                store.mark_account_fetched(&e.chain_id, &e.address)?;
            }
        }
        None => warn!("no balances given; approval waits on balances unless a request disables the check"),
    }
    Ok(Arc::new(store))
}

/// Walks the queue front to back, printing each request and resolving it.
pub fn review(orch: &CliOrchestrator, cli: &Cli, out: &mut impl Write) -> eyre::Result<ReviewSummary> {
    let mut summary = ReviewSummary::default();
    loop {
        let session = match orch.open_next_session() {
            Ok(Some(session)) => session,
            Ok(None) => break,
            Err(err) => {
                let Some(request) = orch.queue.next()? else {
                    break;
                };
                warn!(id = %request.id, error = %err, "request cannot be reviewed");
                writeln!(out, "{} rejected: {err}", request.id)?;
                orch.reject_id(request.id)?;
                summary.rejected += 1;
                continue;
            }
        };

        print_session(out, &session, cli.raw)?;
        apply_edits(&session, cli);

        if cli.reject {
            orch.reject(&session)?;
            writeln!(out, "  rejected")?;
            summary.rejected += 1;
            continue;
        }

        match orch.approve(&session) {
            Ok(_) => {
                summary.approved += 1;
                if let Some(InteractionResult::Approved(doc)) = orch.queue.take_result(session.id())? {
                    writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
                }
            }
            Err(SessionError::ApproveDisabled(block)) => {
                let reason = session
                    .validation()
                    .first_error
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| block.to_string());
                writeln!(out, "  cannot approve: {reason}")?;
                orch.reject(&session)?;
                summary.rejected += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(summary)
}

fn print_session(out: &mut impl Write, session: &SignTxSession, raw: bool) -> eyre::Result<()> {
    let data = &session.request().data;
    writeln!(
        out,
        "{} on {} from {}",
        session.id(),
        data.chain_id,
        data.origin.as_deref().unwrap_or("unknown origin")
    )?;

    if raw {
        if let Some(doc) = session.sign_doc_json() {
            writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        }
    } else {
        for msg in session.messages() {
            writeln!(out, "  {}: {}", msg.title, msg.content)?;
        }
    }

    let configs = session.configs();
    let fee = configs
        .fee
        .fee()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let fee = if fee.is_empty() { "none" } else { fee.as_str() };
    writeln!(out, "  fee: {fee} (gas {})", configs.gas.value())?;
    if session.prefer_no_set_fee() {
        writeln!(out, "  fee set by the requester")?;
    }
    writeln!(out, "  memo: {}", configs.memo.value())?;
    Ok(())
}

fn apply_edits(session: &SignTxSession, cli: &Cli) {
    let configs = session.configs();
    if let Some(memo) = &cli.memo {
        configs.memo.set_value(memo.clone());
    }
    if let Some(gas) = cli.gas {
        configs.gas.set_value(gas);
    }
    if let Some(tier) = cli.fee_type {
        configs.fee.set_fee_type(tier.into());
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> eyre::Result<T> {
    let raw = fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).wrap_err_with(|| format!("parsing {}", path.display()))
}
