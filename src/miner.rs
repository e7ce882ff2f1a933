use tracing::{debug, info};

use crate::config::{MinerConfig, TierExhaustion};
use crate::error::{AprioriError, Result};
use crate::itemset::ItemSet;
use crate::rules::{emit_rules, RuleSink};
use crate::subsets::generate_tiers;
use crate::support::{prune_single_items, prune_tier};
use crate::transactions::TransactionStore;

/// Mines a transaction store and pushes the resulting rules into a sink.
pub trait ItemSetMiner {
    fn mine(&self, store: &TransactionStore, sink: &mut dyn RuleSink) -> Result<MiningSummary>;
}

/// Counters describing one mining run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MiningSummary {
    pub transactions: usize,
    pub frequent_items: usize,
    pub candidates: usize,
    pub retained: usize,
    pub rules: usize,
    /// The pass ended at an empty tier before reaching the largest one.
    pub stopped_early: bool,
}

/// Apriori over the full power set of the frequent single items.
///
/// ```rust
/// use apriori::{Apriori, ItemSetMiner, Rule, TransactionStore};
///
/// let store: TransactionStore = "1 2 3\n1 2\n1 3\n2 3\n1\n".parse().unwrap();
/// let mut rules: Vec<Rule> = Vec::new();
/// let summary = Apriori::new(40).mine(&store, &mut rules).unwrap();
///
/// assert_eq!(summary.rules, rules.len());
/// assert_eq!(rules[0].to_string(), "{1}\t{2}\t40.00\t50.00");
/// ```
#[derive(Clone, Debug)]
pub struct Apriori {
    min_support: u32,
    config: MinerConfig,
}

impl Apriori {
    /// `min_support` is a percentage of the transaction count.
    pub fn new(min_support: u32) -> Self {
        Self::with_config(min_support, MinerConfig::default())
    }

    pub fn with_config(min_support: u32, config: MinerConfig) -> Self {
        Self {
            min_support,
            config,
        }
    }

    /// Every itemset that survives pruning, singles first, in the order rules
    /// would be written for them. No rules are computed.
    pub fn frequent_itemsets(&self, store: &TransactionStore) -> Result<Vec<ItemSet>> {
        let (_, frequent) = self.run(store, None)?;
        Ok(frequent)
    }

    fn run(
        &self,
        store: &TransactionStore,
        mut sink: Option<&mut dyn RuleSink>,
    ) -> Result<(MiningSummary, Vec<ItemSet>)> {
        let mut summary = MiningSummary {
            transactions: store.len(),
            ..MiningSummary::default()
        };

        let singles = prune_single_items(store.frequencies(), store.len(), self.min_support)?;
        summary.frequent_items = singles.len();
        if let Some(limit) = self.config.effective_max_frequent_items() {
            if singles.len() > limit {
                return Err(AprioriError::CandidateLimit {
                    found: singles.len(),
                    limit,
                });
            }
        }

        let tiers = generate_tiers(&singles);
        summary.candidates = tiers.iter().map(Vec::len).sum();
        debug!(
            tiers = tiers.len(),
            candidates = summary.candidates,
            "generated candidates"
        );

        let mut frequent = Vec::new();
        let mut rules = 0;
        for (idx, tier) in tiers.into_iter().enumerate() {
            let size = idx + 1;
            if size == 1 {
                frequent.extend(tier);
                continue;
            }

            let outcome = prune_tier(tier, store, self.min_support, |set| {
                if let Some(sink) = sink.as_deref_mut() {
                    rules += emit_rules(set, store, sink)?;
                }
                Ok(())
            })?;
            debug!(
                size,
                kept = outcome.retained.len(),
                pruned = outcome.pruned,
                "tier counted"
            );
            frequent.extend(outcome.retained);

            if outcome.exhausted
                && self.config.effective_tier_exhaustion() == TierExhaustion::StopWhenTierEmpty
            {
                summary.stopped_early = true;
                debug!(size, "tier exhausted, stopping");
                break;
            }
        }

        summary.retained = frequent.len();
        summary.rules = rules;
        Ok((summary, frequent))
    }
}

impl ItemSetMiner for Apriori {
    fn mine(&self, store: &TransactionStore, sink: &mut dyn RuleSink) -> Result<MiningSummary> {
        let (summary, _) = self.run(store, Some(sink))?;
        info!(
            transactions = summary.transactions,
            frequent_items = summary.frequent_items,
            candidates = summary.candidates,
            retained = summary.retained,
            rules = summary.rules,
            stopped_early = summary.stopped_early,
            "mining finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::{Apriori, ItemSetMiner};
    use crate::config::{MinerConfig, TierExhaustion};
    use crate::error::AprioriError;
    use crate::rules::Rule;
    use crate::transactions::TransactionStore;

    const DATA: &str = "1 2 3\n1 2\n1 3\n2 3\n1\n";

    fn mine(store: &TransactionStore, miner: &Apriori) -> (super::MiningSummary, Vec<String>) {
        let mut rules: Vec<Rule> = Vec::new();
        let summary = miner.mine(store, &mut rules).unwrap();
        (summary, rules.iter().map(|r| r.to_string()).collect())
    }

    #[test]
    fn test_mine_small_dataset() {
        let store: TransactionStore = DATA.parse().unwrap();
        let (summary, lines) = mine(&store, &Apriori::new(40));

        assert_eq!(
            lines,
            vec![
                "{1}\t{2}\t40.00\t50.00",
                "{2}\t{1}\t40.00\t66.67",
                "{1}\t{3}\t40.00\t50.00",
                "{3}\t{1}\t40.00\t66.67",
                "{2}\t{3}\t40.00\t66.67",
                "{3}\t{2}\t40.00\t66.67",
            ]
        );
        assert_eq!(summary.transactions, 5);
        assert_eq!(summary.frequent_items, 3);
        assert_eq!(summary.candidates, 7);
        assert_eq!(summary.retained, 6);
        assert_eq!(summary.rules, 6);
        assert!(!summary.stopped_early);
    }

    #[test]
    fn test_zero_support_keeps_everything() {
        let store: TransactionStore = DATA.parse().unwrap();
        let (summary, lines) = mine(&store, &Apriori::new(0));
        assert_eq!(summary.retained, 7);
        assert_eq!(lines.len(), 2 + 2 + 2 + 6);
        assert_eq!(lines[6], "{1}\t{2,3}\t20.00\t25.00");
    }

    #[test]
    fn test_stop_when_tier_empty() {
        let store: TransactionStore = "1 2\n3 4\n1 3\n2 4\n".parse().unwrap();
        let config = MinerConfig {
            tier_exhaustion: Some(TierExhaustion::StopWhenTierEmpty),
            ..MinerConfig::default()
        };

        let (summary, lines) = mine(&store, &Apriori::with_config(50, config));
        assert!(lines.is_empty());
        assert!(summary.stopped_early);
        assert_eq!(summary.retained, 4);

        let (summary, _) = mine(&store, &Apriori::new(50));
        assert!(!summary.stopped_early);
        assert_eq!(summary.retained, 4);
    }

    #[test]
    fn test_frequent_itemsets() {
        let store: TransactionStore = DATA.parse().unwrap();
        let sets: Vec<String> = Apriori::new(40)
            .frequent_itemsets(&store)
            .unwrap()
            .iter()
            .map(|s| format!("{}:{}", s, s.count()))
            .collect();
        assert_eq!(sets, vec!["{1}:4", "{2}:3", "{3}:3", "{1,2}:2", "{1,3}:2", "{2,3}:2"]);
    }

    #[test]
    fn test_pruning_keeps_sibling_order() {
        let store: TransactionStore = "1 2\n2 3\n1 2\n2 3\n1\n3\n".parse().unwrap();
        let miner = Apriori::new(30);

        let sets: Vec<String> = miner
            .frequent_itemsets(&store)
            .unwrap()
            .iter()
            .map(|s| format!("{}:{}", s, s.count()))
            .collect();
        assert_eq!(sets, vec!["{1}:3", "{2}:4", "{3}:3", "{1,2}:2", "{2,3}:2"]);

        let (summary, lines) = mine(&store, &miner);
        assert_eq!(
            lines,
            vec![
                "{1}\t{2}\t33.33\t66.67",
                "{2}\t{1}\t33.33\t50.00",
                "{2}\t{3}\t33.33\t50.00",
                "{3}\t{2}\t33.33\t66.67",
            ]
        );
        assert_eq!(summary.candidates, 7);
        assert_eq!(summary.retained, 5);
    }

    #[test]
    fn test_zero_support_unseen_antecedent_fails_after_partial_output() {
        let store: TransactionStore = "1 2\n3\n".parse().unwrap();
        let mut rules: Vec<Rule> = Vec::new();

        let err = Apriori::new(0).mine(&store, &mut rules).unwrap_err();
        assert!(matches!(
            err,
            AprioriError::DivisionByZero {
                context: "rule confidence"
            }
        ));
        assert_eq!(rules.len(), 10);
        assert_eq!(rules[6].to_string(), "{1}\t{2,3}\t0.00\t0.00");
    }

    #[test]
    fn test_empty_store_fails() {
        let store = TransactionStore::new();
        let mut rules: Vec<Rule> = Vec::new();
        let err = Apriori::new(10).mine(&store, &mut rules).unwrap_err();
        assert!(matches!(err, AprioriError::DivisionByZero { .. }));
    }

    #[test]
    fn test_candidate_limit() {
        let store: TransactionStore = DATA.parse().unwrap();
        let config = MinerConfig {
            max_frequent_items: Some(2),
            ..MinerConfig::default()
        };
        let mut rules: Vec<Rule> = Vec::new();
        let err = Apriori::with_config(40, config).mine(&store, &mut rules).unwrap_err();
        assert!(matches!(err, AprioriError::CandidateLimit { found: 3, limit: 2 }));
    }
}
