use alloy::primitives::U256;
use vault_sdk::{
    Chain, margin, num, pool,
    state::PoolSnapshot,
    swap,
    testing::{self, PoolTokenBuilder, PositionBuilder, usd, usdv},
};

/// Drives the full preview flow a UI poll triggers: decode the reader's
/// flat snapshot, derive pool views, price a swap both ways and compute
/// position risk numbers from the same state.
#[test]
fn test_poll_to_preview_flow() {
    let chain = Chain::testnet();

    // One flat value array across the whole whitelist, reader order
    let mut values = Vec::new();
    for token in chain.tokens() {
        let builder = match token.symbol.as_str() {
            "WMON" => PoolTokenBuilder::new()
                .pool_amount(testing::scale(100_000, 18))
                .reserved_amount(testing::scale(20_000, 18))
                .usdv_amount(usdv(250_000))
                .weight(U256::from(25_000u64))
                .min_price(usd(2))
                .max_price(usd(2)),
            "WETH" => PoolTokenBuilder::new()
                .pool_amount(testing::scale(120, 18))
                .usdv_amount(usdv(300_000))
                .weight(U256::from(30_000u64))
                .min_price(usd(3_000))
                .max_price(usd(3_000)),
            "WBTC" => PoolTokenBuilder::new()
                .pool_amount(testing::scale(6, 8))
                .usdv_amount(usdv(250_000))
                .weight(U256::from(25_000u64))
                .min_price(usd(60_000))
                .max_price(usd(60_000)),
            "USDC" => PoolTokenBuilder::new()
                .pool_amount(testing::scale(200_000, 6))
                .usdv_amount(usdv(200_000))
                .weight(U256::from(20_000u64))
                .min_price(usd(1))
                .max_price(usd(1)),
            other => panic!("unexpected testnet token {other}"),
        };
        values.extend(builder.token(token.address).values());
    }

    let snapshot = PoolSnapshot::decode(
        chain.tokens(),
        &values,
        usdv(1_000_000),
        U256::from(100_000u64),
    )
    .unwrap();

    // Derived pool views
    let wmon = snapshot
        .state(chain.token_by_symbol("WMON").address)
        .unwrap();
    assert_eq!(wmon.available_amount(), testing::scale(80_000, 18));
    assert_eq!(wmon.available_usd(), usd(160_000));

    // WMON sits at exactly its target (25% of 1M), so a deposit that
    // moves it away must cost at least the base fee and a withdrawal
    // can never cost more
    let fees = chain.fees();
    let deposit_fee = pool::mint_fee_basis_points(
        fees,
        wmon,
        usdv(50_000),
        snapshot.usdv_supply(),
        snapshot.total_token_weights(),
    )
    .unwrap();
    assert!(deposit_fee >= fees.mint_burn_fee_bps);
    let withdraw_fee = pool::burn_fee_basis_points(
        fees,
        wmon,
        usdv(50_000),
        snapshot.usdv_supply(),
        snapshot.total_token_weights(),
    )
    .unwrap();
    assert!(withdraw_fee >= fees.mint_burn_fee_bps);

    // Swap previews agree between directions at the shared price pair
    let weth = chain.token_by_symbol("WETH");
    let wbtc = chain.token_by_symbol("WBTC");
    let forward = swap::next_to_amount(&chain, &snapshot, weth, wbtc, num::pow10(18)).unwrap();
    assert!(forward.amount > U256::ZERO);
    assert!(forward.fee_basis_points >= fees.swap_fee_bps);

    let backward =
        swap::next_from_amount(&chain, &snapshot, weth, wbtc, U256::from(5_000_000u64)).unwrap();
    assert_eq!(backward.fee_basis_points, forward.fee_basis_points);
    // Deducting a fee forward and grossing it up backward both round
    // against the trader, so the round trip never underprices the input
    assert!(backward.amount >= num::pow10(18));

    // Position risk numbers from the same mark price
    let position = PositionBuilder::new()
        .index_token(weth.address)
        .size(usd(30_000))
        .collateral(usd(3_000))
        .average_price(usd(3_000))
        .build();

    let mark = snapshot.state(weth.address).unwrap().min_price();
    let delta = margin::position_delta(&chain, mark, &position, None, 0).unwrap();
    assert_eq!(delta.delta, U256::ZERO); // opened at the mark

    let leverage = margin::leverage(
        &chain,
        &margin::LeverageParams {
            size: position.size(),
            collateral: position.collateral(),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(leverage, U256::from(100_000u64)); // 10x

    let liquidation = margin::liquidation_price(
        &chain,
        &margin::LiquidationPriceParams::from_position(&position),
    )
    .unwrap();
    assert!(liquidation < position.average_price());
    assert!(liquidation > U256::ZERO);
}

/// A truncated reader response must surface as a decode error, not as a
/// partially filled snapshot.
#[test]
fn test_truncated_snapshot_is_rejected() {
    let chain = Chain::testnet();
    let values = vec![U256::ZERO; 7];
    assert!(PoolSnapshot::decode(chain.tokens(), &values, U256::ZERO, U256::ZERO).is_err());
}
