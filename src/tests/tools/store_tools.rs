// Store headcount tool tests

use crate::config::StoresConfig;
use crate::stores::{StoreCounts, StoreRegistry};
use crate::tools::stores::STORE_NOT_FOUND;
use crate::tools::{AddUserTool, StoreInfoTool, UserLeaveTool};
use std::sync::Arc;
use std::thread;

fn registry() -> StoreRegistry {
    StoreRegistry::from_seeds(&StoresConfig::default().initial)
}

#[test]
fn test_add_user_and_manager() {
    let registry = registry();

    let text = AddUserTool {
        store_name: "store1".to_string(),
        is_manager: false,
    }
    .run(&registry);
    assert_eq!(text, r#"now store1 user {"user_cnt": 19, "manager_cnt": 2}"#);

    let text = AddUserTool {
        store_name: "STORE1".to_string(),
        is_manager: true,
    }
    .run(&registry);
    assert_eq!(text, r#"now STORE1 user {"user_cnt": 19, "manager_cnt": 3}"#);
}

#[test]
fn test_user_leave_saturates_at_zero() {
    let registry = registry();
    let leave = UserLeaveTool {
        store_name: "Store2".to_string(),
        is_manager: true,
    };

    assert_eq!(leave.run(&registry), r#"now Store2 user {"user_cnt": 20, "manager_cnt": 0}"#);
    assert_eq!(
        registry.info("store2"),
        Some(StoreCounts {
            user_cnt: 20,
            manager_cnt: 0
        })
    );
}

#[test]
fn test_store_info() {
    let registry = registry();

    let text = StoreInfoTool {
        store_name: "store1".to_string(),
    }
    .run(&registry);

    assert_eq!(text, r#"store1 user info {"user_cnt": 18, "manager_cnt": 2}"#);
}

#[test]
fn test_unknown_store() {
    let registry = registry();

    let add = AddUserTool {
        store_name: "store9".to_string(),
        is_manager: false,
    };
    let info = StoreInfoTool {
        store_name: "store9".to_string(),
    };

    assert_eq!(add.run(&registry), STORE_NOT_FOUND);
    assert_eq!(info.run(&registry), "store not found.");
    assert_eq!(registry.names(), vec!["STORE1", "STORE2"]);
}

#[test]
fn test_concurrent_additions_are_not_lost() {
    let registry = Arc::new(registry());

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..10 {
                    registry.add("store2", false);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.info("STORE2").map(|c| c.user_cnt), Some(120));
}

#[test]
fn test_counts_json_spacing() {
    let counts = StoreCounts {
        user_cnt: 18,
        manager_cnt: 2,
    };

    assert_eq!(counts.to_json(), r#"{"user_cnt": 18, "manager_cnt": 2}"#);
    let parsed: StoreCounts = serde_json::from_str(&counts.to_json()).unwrap();
    assert_eq!(parsed, counts);
}
