//! Human-readable summaries of sign document messages.

use serde::Serialize;

use crate::domain::{ChainInfo, Coin, MsgKind, SignDocMsg};
use crate::units::CoinPretty;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageSummary {
    pub type_name: String,
    pub title: String,
    pub content: String,
}

/// Summarizes one message; unknown types fall back to their raw JSON.
pub fn summarize(msg: &SignDocMsg, chain: Option<&ChainInfo>) -> MessageSummary {
    let field = |names: &[&str]| msg.str_field(names).unwrap_or("?").to_owned();
    let coins = |names: &[&str]| pretty_coins(&msg.coins(names), chain);

    let (title, content) = match msg.kind() {
        MsgKind::Send => (
            "Send",
            format!(
                "Send {} to {}",
                coins(&["amount"]),
                field(&["to_address", "toAddress"])
            ),
        ),
        MsgKind::IbcTransfer => (
            "IBC Transfer",
            format!(
                "Send {} to {} on {}/{}",
                coins(&["token"]),
                field(&["receiver"]),
                field(&["source_port", "sourcePort"]),
                field(&["source_channel", "sourceChannel"])
            ),
        ),
        MsgKind::Delegate => (
            "Stake",
            format!(
                "Stake {} to {}",
                coins(&["amount"]),
                field(&["validator_address", "validatorAddress"])
            ),
        ),
        MsgKind::Undelegate => (
            "Unstake",
            format!(
                "Unstake {} from {}",
                coins(&["amount"]),
                field(&["validator_address", "validatorAddress"])
            ),
        ),
        MsgKind::Redelegate => (
            "Switch Validator",
            format!(
                "Switch {} from {} to {}",
                coins(&["amount"]),
                field(&["validator_src_address", "validatorSrcAddress"]),
                field(&["validator_dst_address", "validatorDstAddress"])
            ),
        ),
        MsgKind::WithdrawReward => (
            "Claim Staking Reward",
            format!(
                "Claim pending staking reward from {}",
                field(&["validator_address", "validatorAddress"])
            ),
        ),
        MsgKind::Vote => (
            "Vote",
            format!(
                "Vote {} on proposal {}",
                vote_option(msg),
                msg.field(&["proposal_id", "proposalId"])
                    .map(json_scalar)
                    .unwrap_or_else(|| "?".to_owned())
            ),
        ),
        MsgKind::ExecuteContract => {
            let funds = msg.coins(&["funds", "sent_funds"]);
            let mut content = format!("Execute contract {}", field(&["contract"]));
            if !funds.is_empty() {
                content.push_str(&format!(" sending {}", pretty_coins(&funds, chain)));
            }
            if let Some(inner) = msg.field(&["msg"]) {
                content.push_str(&format!("\n{inner}"));
            }
            ("Execute Wasm Contract", content)
        }
        MsgKind::Unknown => ("Custom", msg.value.to_string()),
    };

    MessageSummary {
        type_name: msg.type_name.clone(),
        title: title.to_owned(),
        content,
    }
}

fn pretty_coins(coins: &[Coin], chain: Option<&ChainInfo>) -> String {
    if coins.is_empty() {
        return "nothing".to_owned();
    }
    coins
        .iter()
        .map(|coin| {
            chain
                .and_then(|info| CoinPretty::from_coin(info, coin).ok())
                .map(|pretty| pretty.to_string())
                .unwrap_or_else(|| format!("{}{}", coin.amount, coin.denom))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn vote_option(msg: &SignDocMsg) -> String {
    let Some(option) = msg.field(&["option"]) else {
        return "?".to_owned();
    };
    // Amino carries the enum as a number, decoded protobuf as its name.
    let name = match option.as_i64() {
        Some(1) => "Yes",
        Some(2) => "Abstain",
        Some(3) => "No",
        Some(4) => "No with veto",
        Some(_) => "Unspecified",
        None => match option.as_str().unwrap_or_default() {
            "VOTE_OPTION_YES" => "Yes",
            "VOTE_OPTION_ABSTAIN" => "Abstain",
            "VOTE_OPTION_NO" => "No",
            "VOTE_OPTION_NO_WITH_VETO" => "No with veto",
            _ => "Unspecified",
        },
    };
    name.to_owned()
}

fn json_scalar(value: &serde_json::Value) -> String {
    match value.as_str() {
        Some(s) => s.to_owned(),
        None => value.to_string(),
    }
}
