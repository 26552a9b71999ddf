//! # Property Tests
//!
//! The planner and the manager checked against a plain `Vec` model of the
//! display order.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{manager, Id};
    use mc_01_ordered_list::algorithms::{apply_plan, plan_move, plan_removal, plan_resequence};
    use mc_01_ordered_list::domain::invariants::{
        changed_ranks, invariant_dense, invariant_minimal_touch,
    };
    use mc_01_ordered_list::{
        ConcurrencyMode, OrderedListApi, OrderingError, PlanError, Rank, RankBase, RankedEntity,
    };
    use proptest::prelude::*;

    fn scope(len: usize, base: RankBase) -> Vec<RankedEntity<&'static str, Id>> {
        (0..len)
            .map(|i| RankedEntity::new("s", i as Id, base.rank_at(i)))
            .collect()
    }

    fn base_strategy() -> impl Strategy<Value = RankBase> {
        prop_oneof![Just(RankBase::Zero), Just(RankBase::One)]
    }

    /// A scope size with two positions inside it.
    fn positions() -> impl Strategy<Value = (usize, usize, usize)> {
        (1usize..60).prop_flat_map(|len| (Just(len), 0..len, 0..len))
    }

    #[derive(Debug, Clone)]
    enum Op {
        Append(Id),
        Remove(Id),
        Move(Id, Rank),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0u32..16).prop_map(Op::Append),
            1 => (0u32..16).prop_map(Op::Remove),
            3 => ((0u32..16), -2i64..18).prop_map(|(id, target)| Op::Move(id, target)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            .. ProptestConfig::default()
        })]

        /// PROPERTY: Every successful move leaves the scope dense and touches
        /// exactly |to - from| + 1 entities.
        #[test]
        fn property_move_keeps_density_and_minimal_touch(
            (len, from, to) in positions(),
            base in base_strategy(),
        ) {
            prop_assume!(from != to);
            let mut current = scope(len, base);
            let before = current.clone();

            let plan = plan_move(&current, &(from as Id), base.rank_at(to), base).unwrap();
            apply_plan(&mut current, &plan);

            prop_assert!(invariant_dense(&current, base));
            prop_assert!(invariant_minimal_touch(&plan));
            prop_assert_eq!(changed_ranks(&before, &current).len(), from.abs_diff(to) + 1);
        }

        /// PROPERTY: The resulting order equals removing the mover from a list
        /// and inserting it at the target index.
        #[test]
        fn property_move_matches_splice_model(
            (len, from, to) in positions(),
        ) {
            prop_assume!(from != to);
            let mut current = scope(len, RankBase::Zero);
            let mut model: Vec<Id> = (0..len as Id).collect();

            let plan = plan_move(&current, &(from as Id), to as Rank, RankBase::Zero).unwrap();
            apply_plan(&mut current, &plan);
            let moved = model.remove(from);
            model.insert(to, moved);

            let order: Vec<Id> = current.iter().map(|e| e.id).collect();
            prop_assert_eq!(order, model);
        }

        /// PROPERTY: Moving an entity and moving it back restores every rank.
        #[test]
        fn property_move_round_trip(
            (len, from, to) in positions(),
            base in base_strategy(),
        ) {
            prop_assume!(from != to);
            let original = scope(len, base);
            let mut current = original.clone();
            let mover = from as Id;

            let there = plan_move(&current, &mover, base.rank_at(to), base).unwrap();
            apply_plan(&mut current, &there);
            let back = plan_move(&current, &mover, there.from, base).unwrap();
            apply_plan(&mut current, &back);

            prop_assert_eq!(current, original);
        }

        /// PROPERTY: Moving to the current rank is always rejected as a no-op.
        #[test]
        fn property_same_rank_is_noop(
            (len, at, _unused) in positions(),
            base in base_strategy(),
        ) {
            let current = scope(len, base);
            let err = plan_move(&current, &(at as Id), base.rank_at(at), base).unwrap_err();
            let is_noop = matches!(err, PlanError::NoOp { .. });
            prop_assert!(is_noop);
        }

        /// PROPERTY: Targets outside base..base + len are rejected.
        #[test]
        fn property_out_of_range_rejected(
            len in 1usize..40,
            overshoot in 0i64..5,
            base in base_strategy(),
        ) {
            let current = scope(len, base);
            let above = base.end(len) + overshoot;
            let below = base.first() - 1 - overshoot;

            for target in [above, below] {
                let err = plan_move(&current, &0, target, base).unwrap_err();
                let is_out_of_range = matches!(err, PlanError::OutOfRange { .. });
                prop_assert!(is_out_of_range);
            }
        }

        /// PROPERTY: Removal shifts exactly the higher ranks and leaves the
        /// survivors dense and in their previous relative order.
        #[test]
        fn property_removal_compacts(
            (len, removed, _unused) in positions(),
            base in base_strategy(),
        ) {
            let current = scope(len, base);
            let (freed, updates) = plan_removal(&current, &(removed as Id)).unwrap();
            prop_assert_eq!(freed, base.rank_at(removed));
            prop_assert_eq!(updates.len(), len - removed - 1);

            let mut survivors: Vec<_> = current
                .into_iter()
                .filter(|e| e.id != removed as Id)
                .collect();
            for update in &updates {
                if let Some(entity) = survivors.iter_mut().find(|e| e.id == update.id) {
                    entity.rank = update.rank;
                }
            }

            prop_assert!(invariant_dense(&survivors, base));
            let order: Vec<Id> = survivors.iter().map(|e| e.id).collect();
            let expected: Vec<Id> = (0..len as Id).filter(|id| *id != removed as Id).collect();
            prop_assert_eq!(order, expected);
        }

        /// PROPERTY: Resequencing any set of distinct ranks yields the dense
        /// sequence in the same relative order.
        #[test]
        fn property_resequence_repairs_gaps(
            ranks in proptest::collection::btree_set(-50i64..500, 0..40),
            base in base_strategy(),
        ) {
            let mut current: Vec<RankedEntity<&'static str, Id>> = ranks
                .iter()
                .enumerate()
                .map(|(i, rank)| RankedEntity::new("s", i as Id, *rank))
                .collect();

            for update in plan_resequence(&current, base) {
                if let Some(entity) = current.iter_mut().find(|e| e.id == update.id) {
                    entity.rank = update.rank;
                }
            }

            prop_assert!(invariant_dense(&current, base));
            for (i, entity) in current.iter().enumerate() {
                prop_assert_eq!(entity.rank, base.rank_at(i));
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 48,
            .. ProptestConfig::default()
        })]

        /// PROPERTY: Any sequence of operations through the manager matches
        /// the list model, including which operations are rejected.
        #[test]
        fn property_manager_matches_model(
            ops in proptest::collection::vec(op_strategy(), 0..40),
            base in base_strategy(),
            optimistic in any::<bool>(),
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let mode = if optimistic {
                ConcurrencyMode::Optimistic
            } else {
                ConcurrencyMode::Pessimistic
            };
            let (manager, _store) = manager(mode, base);
            let mut model: Vec<Id> = Vec::new();

            for op in ops {
                let position = |id: Id, model: &Vec<Id>| model.iter().position(|m| *m == id);
                match op {
                    Op::Append(id) => {
                        let result = runtime.block_on(manager.append(&"s", id));
                        if position(id, &model).is_some() {
                            let rejected = matches!(result, Err(OrderingError::AlreadyRanked { .. }));
                            prop_assert!(rejected);
                        } else {
                            prop_assert_eq!(result.unwrap(), base.rank_at(model.len()));
                            model.push(id);
                        }
                    }
                    Op::Remove(id) => {
                        let result = runtime.block_on(manager.remove(&"s", &id));
                        match position(id, &model) {
                            Some(index) => {
                                prop_assert!(result.is_ok());
                                model.remove(index);
                            }
                            None => {
                                let rejected = matches!(result, Err(OrderingError::NotFound { .. }));
                                prop_assert!(rejected);
                            }
                        }
                    }
                    Op::Move(id, target) => {
                        let result = runtime.block_on(manager.move_to(&"s", &id, target));
                        let in_range = target >= base.first() && target < base.end(model.len());
                        match position(id, &model) {
                            None => {
                                let rejected = matches!(result, Err(OrderingError::NotFound { .. }));
                                prop_assert!(rejected);
                            }
                            Some(_) if !in_range => {
                                let rejected = matches!(result, Err(OrderingError::OutOfRange { .. }));
                                prop_assert!(rejected);
                            }
                            Some(index) if base.rank_at(index) == target => {
                                let rejected = matches!(result, Err(OrderingError::NoOp { .. }));
                                prop_assert!(rejected);
                            }
                            Some(index) => {
                                let plan = result.unwrap();
                                prop_assert!(invariant_minimal_touch(&plan));
                                let moved = model.remove(index);
                                model.insert((target - base.first()) as usize, moved);
                            }
                        }
                    }
                }

                let listed = runtime.block_on(manager.list(&"s")).unwrap();
                prop_assert_eq!(&listed, &model);
            }
        }
    }
}
