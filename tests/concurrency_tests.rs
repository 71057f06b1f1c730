mod common;

use cashdesk::application::customers::CustomerRepository;
use cashdesk::domain::filters::CustomerFilters;
use cashdesk::domain::notification::Notifications;
use cashdesk::domain::ports::CustomerStore;
use cashdesk::domain::validation::DeclarativeCustomerValidator;
use cashdesk::infrastructure::cache::MemoryCache;
use cashdesk::infrastructure::in_memory::InMemoryCustomerStore;
use std::collections::HashSet;
use std::sync::Arc;

fn shared_repository(store: InMemoryCustomerStore) -> Arc<CustomerRepository> {
    Arc::new(CustomerRepository::new(
        Box::new(store),
        Arc::new(MemoryCache::default()),
        Box::new(DeclarativeCustomerValidator),
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_disjoint_writes_lose_nothing() {
    let store = InMemoryCustomerStore::new();
    let repository = shared_repository(store.clone());

    let mut handles = Vec::new();
    for batch in 0..8 {
        let repository = Arc::clone(&repository);
        let candidates = common::random_customers(batch * 100 + 1, 25);
        handles.push(tokio::spawn(async move {
            let mut notifications = Notifications::new();
            let stored = repository.add_customers(candidates, &mut notifications).await;
            (stored, notifications)
        }));
    }

    for handle in handles {
        let (stored, notifications) = handle.await.unwrap();
        assert!(stored.is_some());
        assert!(!notifications.has_any(), "{:?}", notifications.all());
    }

    let all = store.all().await.unwrap();
    assert_eq!(all.len(), 200);
    assert!(common::is_sorted_by_name(&all));

    let ids: HashSet<i32> = all.iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writes_with_same_ids_accept_each_once() {
    let store = InMemoryCustomerStore::new();
    let repository = shared_repository(store.clone());

    let mut handles = Vec::new();
    for _ in 0..4 {
        let repository = Arc::clone(&repository);
        let candidates = common::random_customers(1, 10);
        handles.push(tokio::spawn(async move {
            let mut notifications = Notifications::new();
            let stored = repository.add_customers(candidates, &mut notifications).await;
            (stored.is_some(), notifications.len())
        }));
    }

    let mut successes = 0;
    let mut rejected = 0;
    for handle in handles {
        let (stored, notification_count) = handle.await.unwrap();
        if stored {
            successes += 1;
        }
        rejected += notification_count;
    }

    // Exactly one batch wins; every candidate of the others collides.
    assert_eq!(successes, 1);
    assert_eq!(rejected, 30);
    assert_eq!(store.all().await.unwrap().len(), 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reads_after_write_never_see_stale_cache() {
    let repository = shared_repository(InMemoryCustomerStore::new());
    let filters = CustomerFilters::default();

    assert!(repository.list_customers(&filters).await.unwrap().is_empty());

    let mut expected = 0;
    for batch in 0..5 {
        let mut notifications = Notifications::new();
        repository
            .add_customers(common::random_customers(batch * 10 + 1, 3), &mut notifications)
            .await
            .unwrap();
        expected += 3;

        let listed = repository.list_customers(&filters).await.unwrap();
        assert_eq!(listed.len(), expected);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_run_alongside_writers() {
    let repository = shared_repository(InMemoryCustomerStore::new());

    let writer = {
        let repository = Arc::clone(&repository);
        tokio::spawn(async move {
            for batch in 0..20 {
                let mut notifications = Notifications::new();
                repository
                    .add_customers(common::random_customers(batch * 5 + 1, 5), &mut notifications)
                    .await;
            }
        })
    };

    let reader = {
        let repository = Arc::clone(&repository);
        tokio::spawn(async move {
            for _ in 0..50 {
                let listed = repository
                    .list_customers(&CustomerFilters::default())
                    .await
                    .unwrap();
                // Committed state only grows in whole batches.
                assert_eq!(listed.len() % 5, 0);
                assert!(common::is_sorted_by_name(&listed));
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();

    let all = repository
        .list_customers(&CustomerFilters::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 100);
}
