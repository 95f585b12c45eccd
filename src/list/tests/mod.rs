use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::collection::Collection;
use crate::list::{List, ListBuilder, Storage};

mod array;
mod factory;
mod safe;

// Every runtime configuration of the factory, matching the shapes a
// caller can ask for: both storages, plain and thread-safe.
pub fn configs() -> Vec<Box<dyn List<i32> + Send + Sync>> {
    let mut lists: Vec<Box<dyn List<i32> + Send + Sync>> = Vec::new();
    lists.push(ListBuilder::new().initial_capacity(1).build());
    lists.push(
        ListBuilder::new()
            .initial_capacity(1)
            .thread_safe(true)
            .build(),
    );
    lists.push(
        ListBuilder::new()
            .initial_capacity(2)
            .storage(Storage::Linked)
            .build(),
    );
    lists.push(
        ListBuilder::new()
            .initial_capacity(3)
            .storage(Storage::Linked)
            .thread_safe(true)
            .build(),
    );
    lists
}

pub fn seeded(values: &[i32]) -> Vec<Box<dyn List<i32> + Send + Sync>> {
    let mut lists = configs();
    for list in &mut lists {
        for &v in values {
            list.add(v);
        }
    }
    lists
}
