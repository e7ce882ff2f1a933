//! Frequent itemset mining and association rules with Apriori.
//!
//! Transactions are loaded into a [`TransactionStore`], single items below the
//! support threshold are dropped, the survivors are expanded into every
//! candidate subset, and each size tier is counted and filtered. Every
//! surviving itemset of two or more items is split into all
//! antecedent/consequent pairs, which are written to a [`RuleSink`].

pub mod config;
pub mod error;
pub mod io;
pub mod itemset;
pub mod logging;
pub mod miner;
pub mod rules;
pub mod subsets;
pub mod support;
pub mod transactions;

pub use config::{MinerConfig, TierExhaustion};
pub use error::{AprioriError, Result};
pub use itemset::{Item, ItemSet};
pub use miner::{Apriori, ItemSetMiner, MiningSummary};
pub use rules::{emit_rules, Rule, RuleSink};
pub use subsets::{generate_subsets, generate_tiers};
pub use support::round_to;
pub use transactions::{FrequencyTable, Transaction, TransactionStore};
