//! Vault DEX client SDK.
//!
//! # Overview
//!
//! Client-side mirror of the numeric core of a vault-based spot and
//! perpetual exchange. The hard invariants — margin accounting, fee
//! curves, pool pricing — are enforced on-chain; this crate re-derives
//! them from polled state so the UI can preview exactly what settlement
//! will do:
//!
//! * [`state::PoolSnapshot`] decodes the flat per-token state array the
//!   chain-reading collaborator polls from the vault reader;
//! * [`pool`] and [`swap`] reproduce the fee rebate/tax curve and swap
//!   amount derivation bit for bit (truncating integer division on
//!   [`alloy::primitives::U256`], same operation order as the contract);
//! * [`margin`] computes leverage, unrealized PnL and liquidation prices
//!   for positions;
//! * [`candles`] aggregates raw indexer price ticks into gap-free OHLC
//!   candles for charting.
//!
//! Everything is pure and synchronous: whole snapshots in, fresh values
//! out, `None` wherever the inputs make a computation meaningless.
//! Wallets, RPC transports and indexer queries are external
//! collaborators and out of scope.
//!
//! See `./tests` for end-to-end examples.

pub mod candles;
pub mod error;
pub mod margin;
pub mod num;
pub mod pool;
pub mod state;
pub mod swap;
pub mod testing;
pub mod types;

use alloy::primitives::{Address, U256, address};

use crate::types::{FeeTiers, MinProfit, Token};

/// Chain the vault is deployed on, with its static configuration:
/// fee tiers, risk limits and the token whitelist.
#[derive(Clone, Debug)]
pub struct Chain {
    chain_id: u64,
    fees: FeeTiers,
    min_profit: MinProfit,
    max_leverage_bps: u64,
    liquidation_fee_usd: U256,
    max_price_deviation_bps: u64,
    tokens: Vec<Token>,
    usdv: Token,
}

impl Chain {
    pub fn testnet() -> Self {
        Self {
            chain_id: 10143,
            fees: FeeTiers {
                swap_fee_bps: 30,
                stable_swap_fee_bps: 4,
                tax_bps: 50,
                stable_tax_bps: 20,
                margin_fee_bps: 10,
                mint_burn_fee_bps: 30,
            },
            // Window disabled on testnet; kept configurable
            min_profit: MinProfit {
                time_secs: 0,
                bps: 0,
            },
            // 100x
            max_leverage_bps: 100 * num::BASIS_POINTS_DIVISOR,
            liquidation_fee_usd: U256::from(5u8) * num::pow10(num::PRICE_DECIMALS),
            max_price_deviation_bps: 250,
            tokens: vec![
                Token::erc20(
                    address!("0x760afe86e5de5fa0ee542fc7b7b713e1c5425701"),
                    "WMON",
                    18,
                )
                .wrapped()
                .shortable(),
                Token::erc20(
                    address!("0xb5c2a4d87b8f3b3f5a0b1c00952b8f19e4ab9f2c"),
                    "WETH",
                    18,
                )
                .shortable(),
                Token::erc20(
                    address!("0x6bb7a17acc227fd1f6781d1eedeae01b42047ee0"),
                    "WBTC",
                    8,
                )
                .shortable(),
                Token::erc20(
                    address!("0xf817257fed379853cde0fa4f97ab987181b1e5ea"),
                    "USDC",
                    6,
                )
                .stable(),
            ],
            usdv: Token::erc20(
                address!("0x0d5bf0057877239c2b05538cebd919fc4ebcacf6"),
                "USDV",
                num::USDV_DECIMALS,
            )
            .stable(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn custom(
        chain_id: u64,
        fees: FeeTiers,
        min_profit: MinProfit,
        max_leverage_bps: u64,
        liquidation_fee_usd: U256,
        max_price_deviation_bps: u64,
        tokens: Vec<Token>,
        usdv: Token,
    ) -> Self {
        Self {
            chain_id,
            fees,
            min_profit,
            max_leverage_bps,
            liquidation_fee_usd,
            max_price_deviation_bps,
            tokens,
            usdv,
        }
    }

    /// Configuration of a known chain.
    ///
    /// # Panics
    ///
    /// On an unknown chain id: static reference data is a deployment
    /// constant, not a runtime input.
    pub fn by_id(chain_id: u64) -> Self {
        match chain_id {
            10143 => Self::testnet(),
            other => panic!("unknown chain id: {other}"),
        }
    }

    /// Overrides the minimum-profit window.
    pub fn with_min_profit(mut self, min_profit: MinProfit) -> Self {
        self.min_profit = min_profit;
        self
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Fee tiers of the vault contract.
    pub fn fees(&self) -> &FeeTiers {
        &self.fees
    }

    /// Minimum-profit grace window applied to fresh positions.
    pub fn min_profit(&self) -> MinProfit {
        self.min_profit
    }

    /// Maximum allowed leverage, in basis points.
    pub fn max_leverage_bps(&self) -> u64 {
        self.max_leverage_bps
    }

    /// Fixed fee charged on liquidation, in USD.
    pub fn liquidation_fee_usd(&self) -> U256 {
        self.liquidation_fee_usd
    }

    /// Bid/ask deviation above which a price is flagged unreliable,
    /// in basis points.
    pub fn max_price_deviation_bps(&self) -> u64 {
        self.max_price_deviation_bps
    }

    /// Vault-whitelisted tokens, in whitelist (snapshot) order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The synthetic USD-pegged accounting token.
    pub fn usdv(&self) -> &Token {
        &self.usdv
    }

    /// Whitelisted token by address, if known.
    pub fn token(&self, address: Address) -> Option<&Token> {
        if self.usdv.address == address {
            return Some(&self.usdv);
        }
        self.tokens.iter().find(|token| token.address == address)
    }

    /// Token by display symbol.
    ///
    /// # Panics
    ///
    /// On an unknown symbol: symbols come from static reference data,
    /// not from runtime inputs.
    pub fn token_by_symbol(&self, symbol: &str) -> &Token {
        if self.usdv.symbol == symbol {
            return &self.usdv;
        }
        self.tokens
            .iter()
            .find(|token| token.symbol == symbol)
            .unwrap_or_else(|| panic!("unknown token symbol: {symbol}"))
    }
}
