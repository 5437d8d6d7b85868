mod common;

use std::sync::Arc;

use cosmos_sign_core::domain::{AnyMsg, AuthInfo, DirectSignDoc, Fee, TxBody};
use cosmos_sign_core::tx::{ConfigError, FeeType, TxConfig};
use cosmos_sign_core::{
    ApproveBlock, Coin, InteractionId, Orchestrator, QueryState, SessionError, SignDocWrapper,
    SignOptions, SignTxSession,
};
use serde_json::json;

use common::*;

fn open(request: cosmos_sign_core::InteractionRequest, queries: &Arc<StubQueries>) -> SignTxSession {
    SignTxSession::open(Arc::new(request), StubChains::standard(), queries.clone())
        .expect("open session")
}

#[test]
fn escaped_memo_with_fixed_fee_round_trips() {
    let queries = StubQueries::new();
    queries.fund("cosmoshub-4", COSMOS_SIGNER, "uatom", 10_000_000);
    let session = open(example_request(1, prefer_no_set_fee()), &queries);
    let configs = session.configs();

    assert_eq!(configs.memo.value(), "a&b");
    assert!(session.prefer_no_set_fee());
    assert!(configs.fee.is_manual());
    assert_eq!(configs.fee.fee_type(), None);
    let fee = configs.fee.to_std_fee();
    assert_eq!(fee.amount, vec![Coin::new("uatom", "2000")]);
    assert_eq!(fee.gas, "80000");

    let doc = configs.sign_doc_helper.sign_doc_wrapper().expect("doc loaded");
    assert_eq!(doc.memo(), "a&amp;b");
    assert_eq!(doc.fees(), &[Coin::new("uatom", "2000")]);

    let queue = StubQueue::with([example_request(1, prefer_no_set_fee())]);
    let context = StubContext::popup();
    let outcome = session.approve(&queue, &context).expect("approve");
    assert!(!outcome.proceed_next);
    assert!(outcome.window_closed);
    assert!(context.closed.get());

    let approved = queue.approved.borrow();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].0, InteractionId(1));
    assert_eq!(approved[0].1.memo(), "a&amp;b");
}

#[test]
fn edited_amino_memo_is_escaped_on_output() {
    let queries = StubQueries::new();
    let session = open(example_request(1, prefer_no_set_fee()), &queries);
    session.configs().memo.set_value("x<y & 'z'");

    let doc = session
        .configs()
        .sign_doc_helper
        .sign_doc_wrapper()
        .expect("doc loaded");
    assert_eq!(doc.memo(), "x&lt;y &amp; &#39;z&#39;");
}

#[test]
fn untouched_unescaped_amino_memo_passes_through() {
    let queries = StubQueries::new();
    let request = request(
        4,
        "cosmoshub-4",
        amino_doc(
            "cosmoshub-4",
            vec![Coin::new("uatom", "2000")],
            "80000",
            "raw <memo>",
            vec![send_msg(COSMOS_SIGNER, COSMOS_OTHER, "1")],
        ),
        prefer_no_set_fee(),
    );
    let session = open(request, &queries);

    let doc = session
        .configs()
        .sign_doc_helper
        .sign_doc_wrapper()
        .expect("doc loaded");
    assert_eq!(doc.memo(), "raw <memo>");
}

#[test]
fn direct_memo_is_never_unescaped() {
    let queries = StubQueries::new();
    let doc = SignDocWrapper::Direct(DirectSignDoc {
        chain_id: "cosmoshub-4".to_owned(),
        account_number: "7".to_owned(),
        body: TxBody {
            messages: vec![AnyMsg {
                type_url: "/cosmos.bank.v1beta1.MsgSend".to_owned(),
                value: json!({
                    "fromAddress": COSMOS_SIGNER,
                    "toAddress": COSMOS_OTHER,
                    "amount": [{"denom": "uatom", "amount": "5"}]
                }),
            }],
            memo: "a&amp;b".to_owned(),
            timeout_height: Some("0".to_owned()),
            extra: Default::default(),
        },
        auth_info: AuthInfo {
            fee: Fee {
                amount: vec![Coin::new("uatom", "2000")],
                gas_limit: "80000".to_owned(),
                payer: None,
                granter: None,
                extra: Default::default(),
            },
            extra: Default::default(),
        },
        extra: Default::default(),
    });
    let session = open(request(5, "cosmoshub-4", doc, SignOptions::default()), &queries);

    assert_eq!(session.configs().memo.value(), "a&amp;b");
    let out = session
        .configs()
        .sign_doc_helper
        .sign_doc_wrapper()
        .expect("doc loaded");
    assert_eq!(out.memo(), "a&amp;b");
    assert_eq!(session.messages()[0].title, "Send");
}

#[test]
fn chain_id_mismatch_aborts_before_content() {
    let queries = StubQueries::new();
    let mut request = example_request(2, SignOptions::default());
    request.data.chain_id = "osmosis-1".to_owned();

    let err = SignTxSession::open(Arc::new(request.clone()), StubChains::standard(), queries.clone())
        .err()
        .expect("mismatch must fail");
    match err {
        SessionError::ChainIdMismatch { request, sign_doc } => {
            assert_eq!(request, "osmosis-1");
            assert_eq!(sign_doc, "cosmoshub-4");
        }
        other => panic!("unexpected error: {other}"),
    }

    let orch = Orchestrator::new(
        StubChains::standard(),
        queries,
        StubQueue::with([request]),
        StubContext::popup(),
    );
    assert!(orch.open_next_session().is_err());
    let proceed = orch.reject_id(InteractionId(2)).expect("reject mismatched");
    assert!(!proceed);
    assert_eq!(*orch.queue.rejected.borrow(), vec![InteractionId(2)]);
}

#[test]
fn two_fees_disable_automatic_fee_without_option() {
    let queries = StubQueries::new();
    let request = request(
        3,
        "cosmoshub-4",
        amino_doc(
            "cosmoshub-4",
            vec![Coin::new("uatom", "2000"), Coin::new("ibc/ABCD", "15")],
            "120000",
            "",
            vec![send_msg(COSMOS_SIGNER, COSMOS_OTHER, "1")],
        ),
        SignOptions::default(),
    );
    let session = open(request, &queries);

    assert!(session.prefer_no_set_fee());
    assert!(session.configs().fee.is_manual());
    assert_eq!(
        session.configs().fee.to_std_fee().amount,
        vec![Coin::new("uatom", "2000"), Coin::new("ibc/ABCD", "15")]
    );
    let fee = session.configs().fee.fee();
    assert_eq!(fee[1].to_string(), "15 ibc/ABCD");
}

#[test]
fn single_fee_without_option_uses_average_suggestion() {
    let queries = StubQueries::new();
    let session = open(example_request(6, SignOptions::default()), &queries);

    assert!(!session.prefer_no_set_fee());
    assert_eq!(session.configs().fee.fee_type(), Some(FeeType::Average));
    // ceil(80000 * 0.025)
    assert_eq!(
        session.configs().fee.to_std_fee().amount,
        vec![Coin::new("uatom", "2000")]
    );
    session.configs().gas.set_value(80_001);
    assert_eq!(
        session.configs().fee.to_std_fee().amount,
        vec![Coin::new("uatom", "2001")]
    );
}

#[test]
fn hydration_runs_once_per_request() {
    let queries = StubQueries::new();
    let session = open(example_request(7, prefer_no_set_fee()), &queries);
    session.configs().memo.set_value("edited");
    session.configs().gas.set_value(1);

    session.refresh().expect("refresh");
    session.refresh().expect("refresh");

    assert_eq!(session.hydration_runs(), 1);
    assert_eq!(session.configs().memo.value(), "edited");
    assert_eq!(session.configs().gas.value(), 1);
}

#[test]
fn pending_balance_blocks_approve_unless_check_disabled() {
    let queries = StubQueries::new();
    let queue = StubQueue::with([example_request(8, prefer_no_set_fee())]);
    let session = open(example_request(8, prefer_no_set_fee()), &queries);

    let validation = session.validation();
    assert!(validation.interaction_blocked);
    assert_eq!(validation.first_error, None);
    let err = session
        .approve(&queue, &StubContext::default())
        .expect_err("balance still loading");
    assert!(matches!(err, SessionError::ApproveDisabled(ApproveBlock::Blocked)));
    assert!(queue.approved.borrow().is_empty());

    let options = SignOptions {
        disable_balance_check: true,
        ..prefer_no_set_fee()
    };
    let session = open(example_request(8, options), &queries);
    assert!(!session.validation().interaction_blocked);
    assert_eq!(session.approve_block(&queue), None);
}

#[test]
fn insufficient_balance_reports_amount_first() {
    let queries = StubQueries::new();
    queries.fund("cosmoshub-4", COSMOS_SIGNER, "uatom", 500_000);
    let session = open(example_request(9, prefer_no_set_fee()), &queries);
    let configs = session.configs();

    assert_eq!(
        configs.amount.ui_properties().error,
        Some(ConfigError::InsufficientAmount)
    );
    assert_eq!(
        configs.fee.ui_properties().error,
        Some(ConfigError::InsufficientFee)
    );
    assert_eq!(
        session.validation().first_error,
        Some(ConfigError::InsufficientAmount)
    );
}

#[test]
fn failed_balance_query_is_a_warning() {
    let queries = StubQueries::new();
    queries.set_balance(
        "cosmoshub-4",
        COSMOS_SIGNER,
        "uatom",
        QueryState::Failed("timeout".to_owned()),
    );
    let session = open(example_request(10, prefer_no_set_fee()), &queries);

    let props = session.configs().fee.ui_properties();
    assert_eq!(props.error, None);
    assert_eq!(
        props.warning,
        Some(ConfigError::BalanceQueryFailed("timeout".to_owned()))
    );
}

#[test]
fn zero_gas_document_is_accepted() {
    let queries = StubQueries::new();
    let request = request(
        11,
        "cosmoshub-4",
        amino_doc("cosmoshub-4", Vec::new(), "0", "", Vec::new()),
        prefer_no_set_fee(),
    );
    let session = open(request, &queries);

    assert_eq!(session.configs().gas.ui_properties().error, None);
    assert!(session.configs().fee.fee().is_empty());
    assert!(!session.validation().interaction_blocked);
}

#[test]
fn resolved_request_is_stale() {
    let queries = StubQueries::new();
    queries.fund("cosmoshub-4", COSMOS_SIGNER, "uatom", 10_000_000);
    let queue = StubQueue::with([example_request(12, prefer_no_set_fee())]);
    let context = StubContext::default();
    let session = open(example_request(12, prefer_no_set_fee()), &queries);

    session.approve(&queue, &context).expect("first approve");
    assert!(!context.closed.get());
    let err = session
        .approve(&queue, &context)
        .expect_err("second approve is inert");
    assert!(matches!(err, SessionError::ApproveDisabled(ApproveBlock::Stale)));
    assert_eq!(queue.approved.borrow().len(), 1);
}

#[test]
fn orchestrator_opens_a_fresh_session_per_request() {
    let queries = StubQueries::new();
    queries.fund("cosmoshub-4", COSMOS_SIGNER, "uatom", 10_000_000);
    let orch = Orchestrator::new(
        StubChains::standard(),
        queries,
        StubQueue::with([
            example_request(20, prefer_no_set_fee()),
            example_request(21, prefer_no_set_fee()),
        ]),
        StubContext::popup(),
    );

    let first = orch
        .open_next_session()
        .expect("open")
        .expect("first request");
    assert_eq!(first.id(), InteractionId(20));
    let outcome = orch.approve(&first).expect("approve first");
    assert!(outcome.proceed_next);
    assert!(!outcome.window_closed);

    let second = orch
        .open_next_session()
        .expect("open")
        .expect("second request");
    assert_eq!(second.id(), InteractionId(21));
    assert_eq!(second.hydration_runs(), 1);
    let outcome = orch.reject(&second).expect("reject second");
    assert!(!outcome.proceed_next);
    assert!(outcome.window_closed);

    assert!(orch.open_next_session().expect("open").is_none());
}

fn approve_and_submit(input: &serde_json::Value, id: u64, edit: impl Fn(&SignTxSession)) -> serde_json::Value {
    let queries = StubQueries::new();
    queries.fund("cosmoshub-4", COSMOS_SIGNER, "uatom", 10_000_000);
    let doc: SignDocWrapper = serde_json::from_value(input.clone()).expect("sign doc");
    let request = request(id, "cosmoshub-4", doc, prefer_no_set_fee());
    let queue = StubQueue::with([request.clone()]);
    let session = open(request, &queries);
    edit(&session);

    session
        .approve(&queue, &StubContext::popup())
        .expect("approve");
    let approved = queue.approved.borrow();
    serde_json::to_value(&approved[0].1).expect("submitted json")
}

#[test]
fn direct_doc_keeps_signer_infos_and_extensions() {
    let input = json!({
        "mode": "direct",
        "signDoc": {
            "chain_id": "cosmoshub-4",
            "account_number": "7",
            "body": {
                "messages": [{
                    "type_url": "/cosmos.bank.v1beta1.MsgSend",
                    "value": {
                        "fromAddress": COSMOS_SIGNER,
                        "toAddress": COSMOS_OTHER,
                        "amount": [{"denom": "uatom", "amount": "5"}]
                    }
                }],
                "memo": "m",
                "extension_options": [{
                    "type_url": "/ethermint.types.v1.ExtensionOptionsWeb3Tx",
                    "value": {"typed_data_chain_id": "9000"}
                }],
                "non_critical_extension_options": []
            },
            "auth_info": {
                "signer_infos": [{
                    "public_key": {"type_url": "/cosmos.crypto.secp256k1.PubKey", "key": "A1b2"},
                    "mode_info": {"single": {"mode": "SIGN_MODE_DIRECT"}},
                    "sequence": "3"
                }],
                "fee": {
                    "amount": [{"denom": "uatom", "amount": "2000"}],
                    "gas_limit": "80000",
                    "payer": "",
                    "granter": ""
                },
                "tip": null
            }
        }
    });

    let submitted = approve_and_submit(&input, 20, |session| {
        session.configs().memo.set_value("edited");
        session.configs().gas.set_value(90_000);
    });

    let mut expected = input.clone();
    expected["signDoc"]["body"]["memo"] = json!("edited");
    expected["signDoc"]["auth_info"]["fee"]["gas_limit"] = json!("90000");
    assert_eq!(submitted, expected);
    assert!(submitted["signDoc"]["body"].get("timeout_height").is_none());
}

#[test]
fn amino_doc_keeps_unmodelled_fields() {
    let input = json!({
        "mode": "amino",
        "signDoc": {
            "chain_id": "cosmoshub-4",
            "account_number": "7",
            "sequence": "3",
            "timeout_height": "120",
            "fee": {
                "amount": [{"denom": "uatom", "amount": "2000"}],
                "gas": "80000",
                "feePayer": COSMOS_OTHER
            },
            "msgs": [{
                "type": "cosmos-sdk/MsgSend",
                "value": {
                    "from_address": COSMOS_SIGNER,
                    "to_address": COSMOS_OTHER,
                    "amount": [{"denom": "uatom", "amount": "1000000"}]
                }
            }],
            "memo": "a&amp;b"
        }
    });

    // Untouched memo and gas: the document goes back exactly as received.
    let submitted = approve_and_submit(&input, 21, |_| {});
    assert_eq!(submitted, input);

    let submitted = approve_and_submit(&input, 22, |session| {
        session.configs().memo.set_value("x<y");
    });
    let mut expected = input.clone();
    expected["signDoc"]["memo"] = json!("x&lt;y");
    assert_eq!(submitted, expected);
}

#[test]
fn declared_fee_on_unknown_chain_fails_to_open() {
    let queries = StubQueries::new();
    let doc = amino_doc(
        "unknown-1",
        vec![Coin::new("ufoo", "2000")],
        "80000",
        "",
        vec![send_msg(COSMOS_SIGNER, COSMOS_OTHER, "10")],
    );
    let request = request(23, "unknown-1", doc, prefer_no_set_fee());

    let err = SignTxSession::open(Arc::new(request), StubChains::standard(), queries.clone())
        .err()
        .expect("fee needs the chain");
    assert!(matches!(
        err,
        SessionError::Config(ConfigError::ChainInfo(ref id)) if id == "unknown-1"
    ));
}
