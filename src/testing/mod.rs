//! Test utilities.
//!
//! [`PoolTokenBuilder`] and [`PositionBuilder`] create state instances
//! with controlled values for unit testing the fee, swap and margin
//! calculations; [`swap_chain`]/[`swap_snapshot`] provide a small
//! multi-token pool sitting exactly on its target weights, and the
//! `scale`/`usd`/`usdv` helpers build fixed-point amounts at the
//! canonical exponents.

use alloy::primitives::{Address, U256};

use crate::{
    Chain,
    candles::PriceTick,
    num::{self, PRICE_DECIMALS, USDV_DECIMALS},
    state::{PoolSnapshot, Position, TokenPoolState, VAULT_PROPS_PER_TOKEN},
    types::{FeeTiers, MinProfit, Token},
};

/// Fixed-point amount at an arbitrary decimal exponent.
pub fn scale(amount: u64, decimals: u8) -> U256 {
    U256::from(amount) * num::pow10(decimals)
}

/// USD amount at price scale.
pub fn usd(amount: u64) -> U256 {
    scale(amount, PRICE_DECIMALS)
}

/// USDV amount at the accounting-unit scale.
pub fn usdv(amount: u64) -> U256 {
    scale(amount, USDV_DECIMALS)
}

/// Shorthand for a raw price tick.
pub fn tick(timestamp: u64, price: f64) -> PriceTick {
    PriceTick { timestamp, price }
}

/// Builder for [`TokenPoolState`] instances with controlled values.
///
/// Unset fields stay zero; [`Self::values`] exposes the same state as
/// the flat positional array the vault reader would return, for driving
/// [`PoolSnapshot::decode`].
#[derive(Clone, Debug)]
pub struct PoolTokenBuilder {
    token: Address,
    decimals: u8,
    is_stable: bool,
    values: [U256; VAULT_PROPS_PER_TOKEN],
}

impl Default for PoolTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolTokenBuilder {
    pub fn new() -> Self {
        Self {
            token: Address::ZERO,
            decimals: 18,
            is_stable: false,
            values: [U256::ZERO; VAULT_PROPS_PER_TOKEN],
        }
    }

    pub fn token(mut self, token: Address) -> Self {
        self.token = token;
        self
    }

    pub fn decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn stable(mut self) -> Self {
        self.is_stable = true;
        self
    }

    pub fn pool_amount(mut self, amount: U256) -> Self {
        self.values[0] = amount;
        self
    }

    pub fn reserved_amount(mut self, amount: U256) -> Self {
        self.values[1] = amount;
        self
    }

    pub fn usdv_amount(mut self, amount: U256) -> Self {
        self.values[2] = amount;
        self
    }

    pub fn weight(mut self, weight: U256) -> Self {
        self.values[4] = weight;
        self
    }

    pub fn buffer_amount(mut self, amount: U256) -> Self {
        self.values[5] = amount;
        self
    }

    pub fn global_short_size(mut self, size: U256) -> Self {
        self.values[7] = size;
        self
    }

    pub fn max_global_short_size(mut self, size: U256) -> Self {
        self.values[8] = size;
        self
    }

    pub fn max_global_long_size(mut self, size: U256) -> Self {
        self.values[9] = size;
        self
    }

    pub fn min_price(mut self, price: U256) -> Self {
        self.values[10] = price;
        self.values[14] = price;
        self
    }

    pub fn max_price(mut self, price: U256) -> Self {
        self.values[11] = price;
        self.values[13] = price;
        self
    }

    pub fn guaranteed_usd(mut self, amount: U256) -> Self {
        self.values[12] = amount;
        self
    }

    /// The state as the vault reader's flat positional array.
    pub fn values(&self) -> Vec<U256> {
        self.values.to_vec()
    }

    pub fn build(self) -> TokenPoolState {
        TokenPoolState::new(self.token, self.decimals, self.is_stable, &self.values)
    }
}

/// Builder for [`Position`] instances with controlled values.
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    index_token: Address,
    is_long: bool,
    size: U256,
    collateral: U256,
    average_price: U256,
    entry_funding_rate: U256,
    last_increased_time: u64,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    pub fn new() -> Self {
        Self {
            index_token: Address::ZERO,
            is_long: true,
            size: U256::ZERO,
            collateral: U256::ZERO,
            average_price: U256::ZERO,
            entry_funding_rate: U256::ZERO,
            last_increased_time: 0,
        }
    }

    pub fn index_token(mut self, token: Address) -> Self {
        self.index_token = token;
        self
    }

    pub fn short(mut self) -> Self {
        self.is_long = false;
        self
    }

    pub fn size(mut self, size: U256) -> Self {
        self.size = size;
        self
    }

    pub fn collateral(mut self, collateral: U256) -> Self {
        self.collateral = collateral;
        self
    }

    pub fn average_price(mut self, price: U256) -> Self {
        self.average_price = price;
        self
    }

    pub fn entry_funding_rate(mut self, rate: U256) -> Self {
        self.entry_funding_rate = rate;
        self
    }

    pub fn last_increased_time(mut self, time: u64) -> Self {
        self.last_increased_time = time;
        self
    }

    pub fn build(self) -> Position {
        Position::new(
            self.index_token,
            self.is_long,
            self.size,
            self.collateral,
            self.average_price,
            self.entry_funding_rate,
            self.last_increased_time,
        )
    }
}

/// A chain with two shortable tokens, two stables and one token without
/// a price feed, for exercising the swap paths.
pub fn swap_chain() -> Chain {
    Chain::custom(
        1337,
        FeeTiers {
            swap_fee_bps: 30,
            stable_swap_fee_bps: 4,
            tax_bps: 50,
            stable_tax_bps: 20,
            margin_fee_bps: 10,
            mint_burn_fee_bps: 30,
        },
        MinProfit::default(),
        100 * num::BASIS_POINTS_DIVISOR,
        usd(5),
        250,
        vec![
            Token::erc20(Address::repeat_byte(0xE1), "WETH", 18).shortable(),
            Token::erc20(Address::repeat_byte(0xB1), "WBTC", 8).shortable(),
            Token::erc20(Address::repeat_byte(0xC1), "USDC", 6).stable(),
            Token::erc20(Address::repeat_byte(0xC2), "USDT", 6).stable(),
            Token::erc20(Address::repeat_byte(0xDD), "DEAD", 18),
        ],
        Token::erc20(Address::repeat_byte(0xF1), "USDV", USDV_DECIMALS).stable(),
    )
}

/// Pool snapshot for [`swap_chain`] with every token exactly on its
/// target weight: 1M USDV supply split 30/30/20/20 across
/// WETH/WBTC/USDC/USDT, the DEAD token carrying no state.
pub fn swap_snapshot(chain: &Chain) -> PoolSnapshot {
    let mut values = Vec::new();
    for token in chain.tokens() {
        let builder = match token.symbol.as_str() {
            "WETH" => PoolTokenBuilder::new()
                .usdv_amount(usdv(300_000))
                .weight(U256::from(30_000u64))
                .min_price(usd(3_000))
                .max_price(usd(3_000)),
            "WBTC" => PoolTokenBuilder::new()
                .usdv_amount(usdv(300_000))
                .weight(U256::from(30_000u64))
                .min_price(usd(60_000))
                .max_price(usd(60_000)),
            "USDC" | "USDT" => PoolTokenBuilder::new()
                .usdv_amount(usdv(200_000))
                .weight(U256::from(20_000u64))
                .min_price(usd(1))
                .max_price(usd(1)),
            _ => PoolTokenBuilder::new(),
        };
        values.extend(builder.token(token.address).values());
    }
    PoolSnapshot::decode(chain.tokens(), &values, usdv(1_000_000), U256::from(100_000u64))
        .expect("swap snapshot fixture decodes")
}
