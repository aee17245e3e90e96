use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use estate_app::{RecordingNotifier, ViewController};
use estate_nullables::{NullDataClient, NullKeyValueStore, NullRandom, NullWallet};
use estate_types::{ListingId, WalletAddress};
use estate_wallet_core::{PaymentConfig, PaymentGateway, WalletProvider};

#[derive(Debug, Clone)]
enum Action {
    Mint { total: u64 },
    Edit { pick: usize, total: u64 },
    Buy { pick: usize, quantity: u64 },
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (1u64..400).prop_map(|total| Action::Mint { total }),
        (any::<usize>(), 0u64..500).prop_map(|(pick, total)| Action::Edit { pick, total }),
        (any::<usize>(), 0u64..150).prop_map(|(pick, quantity)| Action::Buy { pick, quantity }),
    ]
}

fn controller(data: Arc<NullDataClient>) -> ViewController {
    let wallet = NullWallet::new(
        WalletAddress::parse("0x2222222222222222222222222222222222222222").unwrap(),
    );
    let gateway = PaymentGateway::new(
        Some(Arc::new(wallet) as Arc<dyn WalletProvider>),
        PaymentConfig {
            success_delay: Duration::ZERO,
            ..PaymentConfig::default()
        },
    );
    ViewController::new(
        data,
        Arc::new(NullKeyValueStore::new()),
        gateway,
        Arc::new(RecordingNotifier::new()),
    )
    .with_random(Arc::new(NullRandom::constant(0.5)))
}

fn pick_id(controller: &ViewController, pick: usize) -> Option<ListingId> {
    let listings = &controller.state().listings;
    if listings.is_empty() {
        return None;
    }
    Some(listings[pick % listings.len()].id.clone())
}

async fn run(controller: &mut ViewController, action: Action) {
    match action {
        Action::Mint { total } => {
            let form = &mut controller.state_mut().mint_form;
            form.title = format!("Plot of {total}");
            form.total_shares = total;
            let _ = controller.mint().await;
        }
        Action::Edit { pick, total } => {
            let Some(id) = pick_id(controller, pick) else { return };
            if let Ok(edit) = controller.begin_edit(&id) {
                edit.total_shares = total;
            }
            let _ = controller.save_edit().await;
            controller.cancel_edit();
        }
        Action::Buy { pick, quantity } => {
            let Some(id) = pick_id(controller, pick) else { return };
            if controller.select_listing(&id).await.is_err() {
                return;
            }
            controller.set_buy_quantity(quantity);
            if controller.open_payment().is_ok() {
                let _ = controller.pay().await;
            }
            controller.close_payment();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// No mix of minting, editing, and buying leaves more shares available than exist.
    #[test]
    fn available_never_exceeds_total(actions in prop::collection::vec(action(), 1..25)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let data = Arc::new(NullDataClient::new());
        let mut controller = controller(data.clone());

        runtime.block_on(async {
            controller.demo_login().await;
            for action in actions {
                run(&mut controller, action).await;
                for listing in data.listings() {
                    assert!(
                        listing.available_shares <= listing.total_shares,
                        "{} has {} of {} available",
                        listing.id, listing.available_shares, listing.total_shares
                    );
                }
                for listing in &controller.state().listings {
                    assert!(listing.available_shares <= listing.total_shares);
                }
            }
        });
    }
}
