mod balance_tests;

use crate::cache::in_memory::InMemoryCache;
use crate::logger::in_memory::InMemoryLogging;
use crate::service::DivvyService;
use crate::storage::in_memory::InMemoryStorage;

pub fn create_test_service() -> DivvyService<InMemoryLogging, InMemoryStorage, InMemoryCache> {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let cache = InMemoryCache::new();
    DivvyService::new(storage, logging, cache)
}
