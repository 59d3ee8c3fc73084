//! Debt simplification
//!
//! Greedy min-cash-flow settlement: collapse a group's pairwise debts into
//! the smaller set of edges needed to preserve every member's net position.
//! The two-pointer greedy is the standard practical heuristic; it bounds the
//! result at `creditors + debtors - 1` edges but does not guarantee the
//! globally minimal transaction count.

use std::collections::HashMap;

use core_kernel::{Money, UserId};

use crate::balance::BalanceGraph;

/// Produces a simplified balance graph with the same net position per member.
///
/// Members whose net is within the settlement epsilon of zero end up with an
/// empty row. The input graph is not modified; callers swap in the result.
pub fn simplify_debts(graph: &BalanceGraph) -> BalanceGraph {
    let mut net: HashMap<UserId, Money> = graph.members().map(|m| (m, Money::ZERO)).collect();

    // Each symmetric pair is stored twice; folding only the positive
    // direction counts every debt exactly once.
    for member in graph.members() {
        if let Some(row) = graph.row(member) {
            for (&counterpart, &amount) in row {
                if amount.amount() > rust_decimal::Decimal::ZERO {
                    *net.entry(member).or_default() += amount;
                    *net.entry(counterpart).or_default() -= amount;
                }
            }
        }
    }

    let mut creditors: Vec<(UserId, Money)> = Vec::new();
    let mut debtors: Vec<(UserId, Money)> = Vec::new();
    for (&member, &amount) in &net {
        if amount.is_positive() {
            creditors.push((member, amount));
        } else if amount.is_negative() {
            debtors.push((member, amount.abs()));
        }
    }

    // Largest amounts first; ties broken by id so the output is deterministic
    creditors.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    debtors.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut simplified = BalanceGraph::new();
    for member in graph.members() {
        simplified.add_member(member);
    }

    let (mut i, mut j) = (0, 0);
    while i < creditors.len() && j < debtors.len() {
        let (creditor, credit_remaining) = creditors[i];
        let (debtor, debt_remaining) = debtors[j];

        let settle = credit_remaining.min(debt_remaining);
        simplified.adjust(creditor, debtor, settle);

        creditors[i].1 -= settle;
        debtors[j].1 -= settle;

        if creditors[i].1.is_negligible() {
            i += 1;
        }
        if debtors[j].1.is_negligible() {
            j += 1;
        }
    }

    simplified
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn graph_of(edges: &[(UserId, UserId, i64)], members: &[UserId]) -> BalanceGraph {
        let mut graph = BalanceGraph::new();
        for &m in members {
            graph.add_member(m);
        }
        for &(creditor, debtor, minor) in edges {
            graph.adjust(creditor, debtor, Money::from_minor(minor));
        }
        graph
    }

    #[test]
    fn test_chain_collapses_to_direct_edge() {
        // A owes B 100, B owes C 100 -> A owes C 100 directly
        let (a, b, c) = (UserId::new(), UserId::new(), UserId::new());
        let graph = graph_of(&[(b, a, 10000), (c, b, 10000)], &[a, b, c]);

        let simplified = simplify_debts(&graph);

        assert_eq!(simplified.get(c, a), Money::new(dec!(100)));
        assert_eq!(simplified.get(a, c), Money::new(dec!(-100)));
        assert_eq!(simplified.net(b), Money::ZERO);
        assert!(simplified.row(b).unwrap().is_empty());
        assert_eq!(simplified.edge_count(), 1);
    }

    #[test]
    fn test_nets_are_preserved() {
        let members: Vec<UserId> = (0..4).map(|_| UserId::new()).collect();
        let graph = graph_of(
            &[
                (members[0], members[1], 20000),
                (members[0], members[2], 20000),
                (members[0], members[3], 20000),
                (members[2], members[0], 10000),
            ],
            &members,
        );

        let simplified = simplify_debts(&graph);

        for &m in &members {
            assert!(simplified.net(m).approx_eq(&graph.net(m)));
        }
    }

    #[test]
    fn test_edge_count_bound() {
        let members: Vec<UserId> = (0..6).map(|_| UserId::new()).collect();
        // One payer covered everyone, then a few cross debts
        let graph = graph_of(
            &[
                (members[0], members[1], 50000),
                (members[0], members[2], 30000),
                (members[3], members[4], 20000),
                (members[5], members[1], 10000),
            ],
            &members,
        );

        let simplified = simplify_debts(&graph);

        let creditors = members
            .iter()
            .filter(|&&m| simplified.net(m).is_positive())
            .count();
        let debtors = members
            .iter()
            .filter(|&&m| simplified.net(m).is_negative())
            .count();
        assert!(simplified.edge_count() <= creditors + debtors - 1);
    }

    #[test]
    fn test_already_settled_graph_stays_empty() {
        let members: Vec<UserId> = (0..3).map(|_| UserId::new()).collect();
        let graph = graph_of(&[], &members);

        let simplified = simplify_debts(&graph);

        assert_eq!(simplified.edge_count(), 0);
        for &m in &members {
            assert!(simplified.contains(m));
        }
    }
}
