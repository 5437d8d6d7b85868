use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InteractionId(pub u64);

impl fmt::Display for InteractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interaction-{}", self.0)
    }
}

/// Wire coin: minimal denom plus a base-10 integer amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub coin_denom: String,
    pub coin_minimal_denom: String,
    pub coin_decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
}

impl Currency {
    /// Placeholder for a denom the registry does not know: shown as-is, no decimals.
    pub fn raw(denom: &str) -> Self {
        Self {
            coin_denom: denom.to_owned(),
            coin_minimal_denom: denom.to_owned(),
            coin_decimals: 0,
            contract_address: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasPriceStep {
    pub low: f64,
    pub average: f64,
    pub high: f64,
}

impl Default for GasPriceStep {
    fn default() -> Self {
        Self {
            low: 0.01,
            average: 0.025,
            high: 0.04,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCurrency {
    #[serde(flatten)]
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price_step: Option<GasPriceStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bech32Config {
    pub bech32_prefix_acc_addr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub chain_id: String,
    pub chain_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<String>,
    pub bech32_config: Bech32Config,
    pub currencies: Vec<Currency>,
    pub fee_currencies: Vec<FeeCurrency>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl ChainInfo {
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    pub fn find_currency(&self, minimal_denom: &str) -> Option<&Currency> {
        self.currencies
            .iter()
            .chain(self.fee_currencies.iter().map(|f| &f.currency))
            .find(|c| c.coin_minimal_denom == minimal_denom)
    }

    /// Like [`ChainInfo::find_currency`], falling back to [`Currency::raw`].
    pub fn force_find_currency(&self, minimal_denom: &str) -> Currency {
        self.find_currency(minimal_denom)
            .cloned()
            .unwrap_or_else(|| Currency::raw(minimal_denom))
    }

    pub fn find_fee_currency(&self, minimal_denom: &str) -> Option<&FeeCurrency> {
        self.fee_currencies
            .iter()
            .find(|f| f.currency.coin_minimal_denom == minimal_denom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignOptions {
    pub prefer_no_set_fee: bool,
    pub prefer_no_set_memo: bool,
    pub disable_balance_check: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    pub gas: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granter: Option<String>,
    /// Fields not modelled here, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AminoMsg {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub value: Value,
}

/// Legacy amino JSON sign document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AminoSignDoc {
    pub chain_id: String,
    pub account_number: String,
    pub sequence: String,
    pub fee: StdFee,
    pub msgs: Vec<AminoMsg>,
    pub memo: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnyMsg {
    pub type_url: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxBody {
    pub messages: Vec<AnyMsg>,
    pub memo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_height: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: Vec<Coin>,
    pub gas_limit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granter: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthInfo {
    pub fee: Fee,
    /// Signer infos and anything else besides the fee, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Structured (protobuf `SignDoc`) document, carried in decoded form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectSignDoc {
    pub chain_id: String,
    pub account_number: String,
    pub body: TxBody,
    pub auth_info: AuthInfo,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignMode {
    Amino,
    Direct,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "signDoc", rename_all = "lowercase")]
pub enum SignDocWrapper {
    Amino(AminoSignDoc),
    Direct(DirectSignDoc),
}

impl SignDocWrapper {
    pub fn mode(&self) -> SignMode {
        match self {
            SignDocWrapper::Amino(_) => SignMode::Amino,
            SignDocWrapper::Direct(_) => SignMode::Direct,
        }
    }

    pub fn chain_id(&self) -> &str {
        match self {
            SignDocWrapper::Amino(doc) => &doc.chain_id,
            SignDocWrapper::Direct(doc) => &doc.chain_id,
        }
    }

    pub fn fees(&self) -> &[Coin] {
        match self {
            SignDocWrapper::Amino(doc) => &doc.fee.amount,
            SignDocWrapper::Direct(doc) => &doc.auth_info.fee.amount,
        }
    }

    pub fn memo(&self) -> &str {
        match self {
            SignDocWrapper::Amino(doc) => &doc.memo,
            SignDocWrapper::Direct(doc) => &doc.body.memo,
        }
    }

    pub fn gas(&self) -> &str {
        match self {
            SignDocWrapper::Amino(doc) => &doc.fee.gas,
            SignDocWrapper::Direct(doc) => &doc.auth_info.fee.gas_limit,
        }
    }

    pub fn msgs(&self) -> Vec<SignDocMsg> {
        match self {
            SignDocWrapper::Amino(doc) => doc
                .msgs
                .iter()
                .map(|m| SignDocMsg {
                    type_name: m.msg_type.clone(),
                    value: m.value.clone(),
                })
                .collect(),
            SignDocWrapper::Direct(doc) => doc
                .body
                .messages
                .iter()
                .map(|m| SignDocMsg {
                    type_name: m.type_url.clone(),
                    value: m.value.clone(),
                })
                .collect(),
        }
    }

    /// Copy of this document with fee coins, gas and memo replaced.
    /// Every other field, modelled or not, is carried over untouched.
    pub fn with_fee_and_memo(&self, fees: Vec<Coin>, gas: String, memo: String) -> Self {
        match self {
            SignDocWrapper::Amino(doc) => {
                let mut doc = doc.clone();
                doc.fee.amount = fees;
                doc.fee.gas = gas;
                doc.memo = memo;
                SignDocWrapper::Amino(doc)
            }
            SignDocWrapper::Direct(doc) => {
                let mut doc = doc.clone();
                doc.auth_info.fee.amount = fees;
                doc.auth_info.fee.gas_limit = gas;
                doc.body.memo = memo;
                SignDocWrapper::Direct(doc)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgKind {
    Send,
    IbcTransfer,
    Delegate,
    Undelegate,
    Redelegate,
    WithdrawReward,
    Vote,
    ExecuteContract,
    Unknown,
}

/// One message of a sign document, independent of its encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct SignDocMsg {
    pub type_name: String,
    pub value: Value,
}

impl SignDocMsg {
    pub fn kind(&self) -> MsgKind {
        match self.type_name.as_str() {
            "cosmos-sdk/MsgSend" | "/cosmos.bank.v1beta1.MsgSend" => MsgKind::Send,
            "cosmos-sdk/MsgTransfer" | "/ibc.applications.transfer.v1.MsgTransfer" => {
                MsgKind::IbcTransfer
            }
            "cosmos-sdk/MsgDelegate" | "/cosmos.staking.v1beta1.MsgDelegate" => MsgKind::Delegate,
            "cosmos-sdk/MsgUndelegate" | "/cosmos.staking.v1beta1.MsgUndelegate" => {
                MsgKind::Undelegate
            }
            "cosmos-sdk/MsgBeginRedelegate" | "/cosmos.staking.v1beta1.MsgBeginRedelegate" => {
                MsgKind::Redelegate
            }
            "cosmos-sdk/MsgWithdrawDelegationReward"
            | "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward" => MsgKind::WithdrawReward,
            "cosmos-sdk/MsgVote" | "/cosmos.gov.v1beta1.MsgVote" | "/cosmos.gov.v1.MsgVote" => {
                MsgKind::Vote
            }
            "wasm/MsgExecuteContract" | "/cosmwasm.wasm.v1.MsgExecuteContract" => {
                MsgKind::ExecuteContract
            }
            _ => MsgKind::Unknown,
        }
    }

    /// Looks up the first of `names` present on the message value. Amino uses
    /// snake_case keys, decoded protobuf JSON may use camelCase.
    pub fn field(&self, names: &[&str]) -> Option<&Value> {
        names.iter().find_map(|name| self.value.get(*name))
    }

    pub fn str_field(&self, names: &[&str]) -> Option<&str> {
        self.field(names).and_then(Value::as_str)
    }

    /// Coins under the first matching field, accepting a single coin or a list.
    pub fn coins(&self, names: &[&str]) -> Vec<Coin> {
        match self.field(names) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                .collect(),
            Some(v @ Value::Object(_)) => serde_json::from_value(v.clone())
                .map(|c| vec![c])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Coins this message moves out of `sender`'s account, if any.
    pub fn spent_by(&self, sender: &str) -> Vec<Coin> {
        let (owner_keys, coin_keys): (&[&str], &[&str]) = match self.kind() {
            MsgKind::Send => (&["from_address", "fromAddress"][..], &["amount"][..]),
            MsgKind::IbcTransfer => (&["sender"][..], &["token"][..]),
            MsgKind::Delegate => (
                &["delegator_address", "delegatorAddress"][..],
                &["amount"][..],
            ),
            _ => return Vec::new(),
        };
        match self.str_field(owner_keys) {
            Some(owner) if owner == sender => self.coins(coin_keys),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInteractionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    pub chain_id: String,
    pub signer: String,
    pub sign_doc: SignDocWrapper,
    #[serde(default)]
    pub sign_options: SignOptions,
}

/// A pending signing task. Shared read-only for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRequest {
    pub id: InteractionId,
    pub data: SignInteractionData,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionInfo {
    /// Running inside a dedicated interaction window.
    pub interaction: bool,
    /// The interaction was opened by the wallet itself rather than a webpage.
    pub interaction_internal: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionResult {
    Approved(SignDocWrapper),
    Rejected,
}
