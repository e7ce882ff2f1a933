use apriori::{Apriori, ItemSetMiner, Rule, TransactionStore};

const DATA: &[&[i64]] = &[
    &[1, 2, 5],
    &[2, 4],
    &[2, 3],
    &[1, 2, 4],
    &[1, 3],
    &[2, 3],
    &[1, 3],
    &[1, 2, 3, 5],
    &[1, 2, 3],
];

fn main() {
    let store: TransactionStore = DATA.iter().map(|row| row.iter().copied()).collect();
    println!("{:?}", store);

    let miner = Apriori::new(20);
    for set in miner.frequent_itemsets(&store).unwrap() {
        println!("Itemset: {}, Support: {}", set, set.count());
    }

    let mut rules: Vec<Rule> = Vec::new();
    let summary = miner.mine(&store, &mut rules).unwrap();
    for rule in &rules {
        println!("{}", rule);
    }
    println!("{:?}", summary);
}
