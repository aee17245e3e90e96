use proptest::prelude::*;

use estate_types::{ChainId, EthAmount, Listing, ListingId, ListingUpdate, WalletAddress};

fn listing(available: u64, total: u64) -> Listing {
    Listing {
        id: ListingId::new("1"),
        title: "Lakeside Condo".into(),
        location: "Austin, TX".into(),
        price_per_share: 0.01,
        yield_pct: 5.0,
        available_shares: available,
        total_shares: total,
        image_url: None,
        description: None,
        seller_id: None,
        history: Vec::new(),
        created_at: None,
    }
}

proptest! {
    /// Whole ETH strings parse to exactly n × 10^18 wei.
    #[test]
    fn parse_ether_whole_units(units in 0u64..1_000_000_000) {
        let amount = EthAmount::parse_ether(&units.to_string()).unwrap();
        prop_assert_eq!(amount.wei(), units as u128 * 1_000_000_000_000_000_000);
    }

    /// format_ether is the inverse of parse_ether for any wei value.
    #[test]
    fn format_then_parse_is_identity(wei in 0u128..u128::MAX / 1_000) {
        let amount = EthAmount::from_wei(wei);
        prop_assert_eq!(EthAmount::parse_ether(&amount.format_ether()).unwrap(), amount);
    }

    /// Ordering of amounts follows ordering of wei.
    #[test]
    fn amount_ordering(a in 0u128..u128::MAX, b in 0u128..u128::MAX) {
        prop_assert_eq!(EthAmount::from_wei(a) <= EthAmount::from_wei(b), a <= b);
    }

    /// saturating_sub never panics and returns ZERO on underflow.
    #[test]
    fn amount_saturating_sub(a in 0u128..1_000_000, b in 0u128..1_000_000) {
        let result = EthAmount::from_wei(a).saturating_sub(EthAmount::from_wei(b));
        if b > a {
            prop_assert_eq!(result, EthAmount::ZERO);
        } else {
            prop_assert_eq!(result, EthAmount::from_wei(a - b));
        }
    }

    /// Any 20 bytes hex-encoded with a 0x prefix form a valid address.
    #[test]
    fn hex_bytes_form_valid_address(bytes in prop::array::uniform20(0u8..)) {
        let raw = format!("0x{}", hex::encode(bytes));
        prop_assert!(WalletAddress::parse(raw).is_ok());
    }

    /// Chain ids survive the hex form used by wallet RPCs.
    #[test]
    fn chain_id_hex(id in 0u64..u64::MAX) {
        let chain = ChainId::new(id);
        prop_assert_eq!(ChainId::from_hex(&chain.to_hex()).unwrap(), chain);
    }

    /// A listing validates exactly when available ≤ total (for non-empty listings).
    #[test]
    fn listing_share_invariant(available in 0u64..10_000, total in 1u64..10_000) {
        prop_assert_eq!(listing(available, total).validate().is_ok(), available <= total);
    }

    /// An accepted edit always leaves the listing consistent.
    #[test]
    fn accepted_update_keeps_invariant(
        available in 0u64..10_000,
        extra in 0u64..10_000,
        new_total in 1u64..20_000,
    ) {
        let mut current = listing(available, available + extra.max(1));
        let update = ListingUpdate { price_per_share: 0.02, total_shares: new_total };
        if update.check_against(&current).is_ok() {
            current.total_shares = update.total_shares;
            prop_assert!(current.validate().is_ok());
        }
    }
}
