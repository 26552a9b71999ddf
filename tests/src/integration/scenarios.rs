//! # Ordering Scenarios
//!
//! Multi-step flows through `OrderedListManager` and the in-memory store,
//! checking the committed rows after every step.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{ranked, rows, seeded, snapshot, Manager, Store};
    use mc_01_ordered_list::domain::invariants::invariant_dense;
    use mc_01_ordered_list::{ConcurrencyMode, OrderedListApi, OrderingError, RankBase};

    const MENU: &str = "restaurant-1";

    async fn assert_dense(store: &Store, base: RankBase) {
        let current = rows(store, MENU).await.unwrap();
        assert!(invariant_dense(&current, base), "not dense: {current:?}");
    }

    async fn menu(count: u32) -> (Manager, Store) {
        seeded(ConcurrencyMode::Pessimistic, RankBase::Zero, MENU, count)
            .await
            .unwrap()
    }

    // =========================================================================
    // EDITING SESSIONS
    // =========================================================================

    #[tokio::test]
    async fn test_editing_session_keeps_ranks_dense() {
        let (manager, store) = menu(5).await;

        manager.move_to(&MENU, &4, 0).await.unwrap();
        assert_eq!(
            snapshot(&store, MENU).await.unwrap(),
            ranked(&[4, 0, 1, 2, 3], RankBase::Zero)
        );

        manager.remove(&MENU, &1).await.unwrap();
        assert_eq!(
            snapshot(&store, MENU).await.unwrap(),
            ranked(&[4, 0, 2, 3], RankBase::Zero)
        );

        manager.append(&MENU, 9).await.unwrap();
        manager.move_to(&MENU, &0, 3).await.unwrap();
        assert_eq!(
            snapshot(&store, MENU).await.unwrap(),
            ranked(&[4, 2, 3, 0, 9], RankBase::Zero)
        );

        assert_dense(&store, RankBase::Zero).await;
        assert_eq!(manager.list(&MENU).await.unwrap(), vec![4, 2, 3, 0, 9]);
    }

    #[tokio::test]
    async fn test_remove_everything_then_start_over() {
        let (manager, store) = menu(3).await;

        for id in [1, 0, 2] {
            manager.remove(&MENU, &id).await.unwrap();
            assert_dense(&store, RankBase::Zero).await;
        }
        assert!(manager.list(&MENU).await.unwrap().is_empty());

        assert_eq!(manager.append(&MENU, 7).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_removed_id_can_be_appended_again() {
        let (manager, _store) = menu(3).await;

        manager.remove(&MENU, &0).await.unwrap();
        assert_eq!(manager.append(&MENU, 0).await.unwrap(), 2);
        assert_eq!(manager.list(&MENU).await.unwrap(), vec![1, 2, 0]);
    }

    #[tokio::test]
    async fn test_move_round_trip_restores_listing() {
        let (manager, store) = menu(6).await;
        let before = snapshot(&store, MENU).await.unwrap();

        let plan = manager.move_to(&MENU, &1, 4).await.unwrap();
        manager.move_to(&MENU, &1, plan.from).await.unwrap();

        assert_eq!(snapshot(&store, MENU).await.unwrap(), before);
    }

    // =========================================================================
    // REJECTIONS LEAVE THE STORE UNTOUCHED
    // =========================================================================

    #[tokio::test]
    async fn test_rejected_operations_do_not_bump_version() {
        let (manager, store) = menu(3).await;
        let version = store.version(&MENU);

        let results = vec![
            manager.move_to(&MENU, &1, 1).await.map(|_| ()),
            manager.move_to(&MENU, &1, 3).await.map(|_| ()),
            manager.move_to(&MENU, &1, -1).await.map(|_| ()),
            manager.move_to(&MENU, &42, 0).await.map(|_| ()),
            manager.remove(&MENU, &42).await,
            manager.append(&MENU, 2).await.map(|_| ()),
        ];

        assert!(matches!(results[0], Err(OrderingError::NoOp { .. })));
        assert!(matches!(results[1], Err(OrderingError::OutOfRange { .. })));
        assert!(matches!(results[2], Err(OrderingError::OutOfRange { .. })));
        assert!(matches!(results[3], Err(OrderingError::NotFound { .. })));
        assert!(matches!(results[4], Err(OrderingError::NotFound { .. })));
        assert!(matches!(results[5], Err(OrderingError::AlreadyRanked { .. })));

        assert_eq!(store.version(&MENU), version);
    }

    #[tokio::test]
    async fn test_commit_failure_rolls_back_every_shift() {
        let (manager, store) = menu(5).await;
        let before = snapshot(&store, MENU).await.unwrap();

        store.fail_next_commit();
        let err = manager.move_to(&MENU, &4, 0).await.unwrap_err();
        assert!(matches!(err, OrderingError::Store(_)));
        assert_eq!(snapshot(&store, MENU).await.unwrap(), before);

        store.fail_next_commit();
        manager.remove(&MENU, &0).await.unwrap_err();
        assert_eq!(snapshot(&store, MENU).await.unwrap(), before);

        // The failure is one-shot
        manager.move_to(&MENU, &4, 0).await.unwrap();
        assert_eq!(manager.list(&MENU).await.unwrap(), vec![4, 0, 1, 2, 3]);
    }

    // =========================================================================
    // LEGACY DATA
    // =========================================================================

    #[tokio::test]
    async fn test_legacy_import_is_repaired_by_resequence() {
        let (manager, store) = menu(0).await;
        // Exported from a 1-based table with a gap left by an old delete
        store.import_scope(MENU, [(10, 1), (11, 2), (12, 5)]);

        let err = manager.move_to(&MENU, &12, 0).await.unwrap_err();
        assert!(matches!(err, OrderingError::InconsistentScope { .. }));

        assert_eq!(manager.resequence(&MENU).await.unwrap(), 3);
        assert_eq!(
            snapshot(&store, MENU).await.unwrap(),
            ranked(&[10, 11, 12], RankBase::Zero)
        );

        manager.move_to(&MENU, &12, 0).await.unwrap();
        assert_eq!(manager.list(&MENU).await.unwrap(), vec![12, 10, 11]);
    }

    #[tokio::test]
    async fn test_resequence_of_dense_scope_rewrites_nothing() {
        let (manager, store) = menu(4).await;
        let version = store.version(&MENU);

        assert_eq!(manager.resequence(&MENU).await.unwrap(), 0);
        assert_eq!(store.version(&MENU), version);
    }

    #[tokio::test]
    async fn test_one_based_scope_after_partial_gap() {
        let (manager, store) = seeded(ConcurrencyMode::Optimistic, RankBase::One, MENU, 0)
            .await
            .unwrap();
        store.import_scope(MENU, [(1, 1), (2, 2), (3, 4)]);

        assert_eq!(manager.resequence(&MENU).await.unwrap(), 1);
        assert_eq!(manager.append(&MENU, 4).await.unwrap(), 4);

        manager.move_to(&MENU, &4, 1).await.unwrap();
        assert_eq!(
            snapshot(&store, MENU).await.unwrap(),
            ranked(&[4, 1, 2, 3], RankBase::One)
        );
        assert_dense(&store, RankBase::One).await;
    }

    // =========================================================================
    // SCOPES ARE INDEPENDENT
    // =========================================================================

    #[tokio::test]
    async fn test_scopes_do_not_interfere() {
        let (manager, store) = menu(3).await;
        for id in 100..103 {
            manager.append(&"restaurant-2", id).await.unwrap();
        }
        let other_before = snapshot(&store, "restaurant-2").await.unwrap();

        manager.move_to(&MENU, &2, 0).await.unwrap();
        manager.remove(&MENU, &0).await.unwrap();

        assert_eq!(snapshot(&store, "restaurant-2").await.unwrap(), other_before);

        let err = manager.move_to(&"restaurant-2", &1, 0).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
