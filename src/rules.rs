use std::fmt;

use tracing::trace;

use crate::error::{AprioriError, Result};
use crate::itemset::{Item, ItemSet};
use crate::subsets::subsets_of;
use crate::support::{percentage, round_to};
use crate::transactions::TransactionStore;

/// An association rule `antecedent -> consequent`, with support and
/// confidence as percentages rounded to two decimals.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub antecedent: ItemSet,
    pub consequent: ItemSet,
    pub support: f64,
    pub confidence: f64,
}

impl Rule {
    /// Scores `antecedent -> consequent` against every transaction in `store`.
    pub fn evaluate(
        antecedent: ItemSet,
        consequent: ItemSet,
        store: &TransactionStore,
    ) -> Result<Self> {
        let (both, with_antecedent) = match (
            store.mask_of(antecedent.items()),
            store.mask_of(consequent.items()),
        ) {
            (Some(lhs), Some(rhs)) => {
                let mut both = 0;
                let mut with_antecedent = 0;
                for transaction in store.transactions() {
                    if transaction.covers(&lhs) {
                        with_antecedent += 1;
                        if transaction.covers(&rhs) {
                            both += 1;
                        }
                    }
                }
                (both, with_antecedent)
            }
            (Some(lhs), None) => (0, store.transactions().iter().filter(|t| t.covers(&lhs)).count()),
            (None, _) => (0, 0),
        };

        let support = percentage(both, store.len(), "rule support")?;
        if with_antecedent == 0 {
            return Err(AprioriError::DivisionByZero {
                context: "rule confidence",
            });
        }
        let confidence = both as f64 / with_antecedent as f64 * 100.0;

        Ok(Self {
            antecedent,
            consequent,
            support: round_to(support, 2),
            confidence: round_to(confidence, 2),
        })
    }
}

/// Tab separated: antecedent, consequent, support, confidence.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{:.2}\t{:.2}",
            self.antecedent, self.consequent, self.support, self.confidence
        )
    }
}

/// Destination for rules as they are produced.
pub trait RuleSink {
    fn emit(&mut self, rule: &Rule) -> Result<()>;
}

impl RuleSink for Vec<Rule> {
    fn emit(&mut self, rule: &Rule) -> Result<()> {
        self.push(rule.clone());
        Ok(())
    }
}

impl<S: RuleSink + ?Sized> RuleSink for &mut S {
    fn emit(&mut self, rule: &Rule) -> Result<()> {
        (**self).emit(rule)
    }
}

/// Emits every rule obtainable by splitting `set` into a non-empty antecedent
/// and the non-empty rest. Returns the number of rules written.
///
/// Antecedents follow subset generation order over the items of `set`. The
/// consequent is whatever remains of a working list that starts as the full
/// set; after each rule the antecedent's items go back onto its tail, so the
/// item order inside a consequent depends on the splits emitted before it.
pub fn emit_rules<S>(set: &ItemSet, store: &TransactionStore, sink: &mut S) -> Result<usize>
where
    S: RuleSink + ?Sized,
{
    let subsets = subsets_of(set);
    let Some((full, antecedents)) = subsets.split_last() else {
        return Ok(0);
    };

    let mut remainder: Vec<Item> = full.items().to_vec();
    for antecedent in antecedents {
        remainder.retain(|&item| !antecedent.contains(item));
        let consequent = ItemSet::from_items(remainder.iter().copied());

        let rule = Rule::evaluate(antecedent.clone(), consequent, store)?;
        trace!(%rule, "rule");
        sink.emit(&rule)?;

        remainder.extend(antecedent.iter());
    }

    Ok(antecedents.len())
}

#[cfg(test)]
mod tests {
    use super::{emit_rules, Rule};
    use crate::error::AprioriError;
    use crate::itemset::ItemSet;
    use crate::transactions::TransactionStore;

    fn store() -> TransactionStore {
        vec![vec![1, 2, 3], vec![1, 2], vec![1, 3], vec![2, 3], vec![1]]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_pair_rules() {
        let store = store();
        let mut rules: Vec<Rule> = Vec::new();
        let n = emit_rules(&ItemSet::from_items(vec![1, 2]), &store, &mut rules).unwrap();

        assert_eq!(n, 2);
        let lines: Vec<String> = rules.iter().map(|r| r.to_string()).collect();
        assert_eq!(lines, vec!["{1}\t{2}\t40.00\t50.00", "{2}\t{1}\t40.00\t66.67"]);
    }

    #[test]
    fn test_triple_split_order() {
        let store = store();
        let mut rules: Vec<Rule> = Vec::new();
        emit_rules(&ItemSet::from_items(vec![1, 2, 3]), &store, &mut rules).unwrap();

        let splits: Vec<(String, String)> = rules
            .iter()
            .map(|r| (r.antecedent.to_string(), r.consequent.to_string()))
            .collect();
        let expected = [
            ("{1}", "{2,3}"),
            ("{2}", "{3,1}"),
            ("{3}", "{1,2}"),
            ("{1,2}", "{3}"),
            ("{1,3}", "{2}"),
            ("{2,3}", "{1}"),
        ];
        assert_eq!(splits.len(), expected.len());
        for ((a, c), (ea, ec)) in splits.iter().zip(expected.iter()) {
            assert_eq!(a, ea);
            assert_eq!(c, ec);
        }

        assert_eq!(rules[0].support, 20.0);
        assert_eq!(rules[0].confidence, 25.0);
        assert_eq!(rules[3].confidence, 50.0);
    }

    #[test]
    fn test_singleton_has_no_rules() {
        let mut rules: Vec<Rule> = Vec::new();
        let n = emit_rules(&ItemSet::singleton(1, 4), &store(), &mut rules).unwrap();
        assert_eq!(n, 0);
        assert!(rules.is_empty());
    }

    #[test]
    fn test_unseen_antecedent_is_division_by_zero() {
        let err = Rule::evaluate(
            ItemSet::singleton(9, 0),
            ItemSet::singleton(1, 0),
            &store(),
        )
        .unwrap_err();
        assert!(matches!(err, AprioriError::DivisionByZero { .. }));
    }
}
