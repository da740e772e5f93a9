use launchpad::models::{Launch, LaunchId};
use launchpad::resolvers::*;
use launchpad::store::{LocalState, LocalStore};
use serde_json::json;
use speculate2::speculate;

fn ids(raw: &[&str]) -> Vec<LaunchId> {
    raw.iter().map(|s| LaunchId::from(*s)).collect()
}

fn sorted(mut items: Vec<LaunchId>) -> Vec<LaunchId> {
    items.sort();
    items
}

speculate! {
    before {
        let store = LocalStore::new();
        store.initialize(LocalState::default()).expect("Failed to initialize");
    }

    describe "resolve_is_in_cart" {
        it "is true exactly for cart members" {
            store.update_cart(|_| ids(&["1", "3"]));

            for (id, expected) in [("1", true), ("2", false), ("3", true), ("4", false)] {
                assert_eq!(resolve_is_in_cart(&Launch::with_id(id), &store), expected, "launch {}", id);
            }
        }

        it "is false when the store was never initialized" {
            let fresh = LocalStore::new();
            assert!(!resolve_is_in_cart(&Launch::with_id("1"), &fresh));
        }
    }

    describe "toggle_reservation" {
        it "adds an id that is absent" {
            store.update_cart(|_| ids(&["1"]));
            let next = toggle_reservation(&"2".into(), &store);
            assert_eq!(sorted(next), ids(&["1", "2"]));
        }

        it "removes an id that is present" {
            store.update_cart(|_| ids(&["1", "2"]));
            let next = toggle_reservation(&"1".into(), &store);
            assert_eq!(next, ids(&["2"]));
        }

        it "restores the original set when applied twice" {
            store.update_cart(|_| ids(&["5", "6"]));
            let original = sorted(store.cart_items());

            for id in ["5", "7"] {
                toggle_reservation(&id.into(), &store);
                let back = toggle_reservation(&id.into(), &store);
                assert_eq!(sorted(back), original, "toggling {}", id);
            }
        }

        it "returns the same list the store now holds" {
            let next = toggle_reservation(&"8".into(), &store);
            assert_eq!(next, store.cart_items());
        }

        it "loses no updates under concurrent toggles" {
            std::thread::scope(|scope| {
                for t in 0..8 {
                    let store = store.clone();
                    scope.spawn(move || {
                        for i in 0..50 {
                            toggle_reservation(&format!("{}-{}", t, i).into(), &store);
                        }
                    });
                }
            });
            assert_eq!(store.cart_items().len(), 400);
        }

        it "populates an uninitialized store" {
            let fresh = LocalStore::new();
            let next = toggle_reservation(&"1".into(), &fresh);
            assert_eq!(next, ids(&["1"]));
            assert_eq!(fresh.cart_items(), ids(&["1"]));
        }
    }

    describe "end to end" {
        it "reserves an id from an empty cart" {
            let next = toggle_reservation(&"42".into(), &store);
            assert_eq!(next, ids(&["42"]));
            assert!(resolve_is_in_cart(&Launch::with_id("42"), &store));
        }

        it "toggling twice leaves the cart empty and the launch unreserved" {
            toggle_reservation(&"42".into(), &store);
            let next = toggle_reservation(&"42".into(), &store);
            assert!(next.is_empty());
            assert!(!resolve_is_in_cart(&Launch::with_id("42"), &store));
        }
    }

    describe "LocalResolvers" {
        before {
            let resolvers = launchpad::resolvers::LocalResolvers::new(store.clone());
        }

        it "reads local query fields" {
            store.update_cart(|_| ids(&["1"]));
            assert_eq!(resolvers.read_local(LocalQueryField::IsLoggedIn), json!(false));
            assert_eq!(resolvers.read_local(LocalQueryField::CartItems), json!(["1"]));
        }

        it "runs addOrRemoveFromCart by name" {
            let first = resolvers
                .mutate_named("addOrRemoveFromCart", &json!({ "id": "42" }))
                .expect("Mutation failed");
            assert_eq!(first, json!(["42"]));

            let second = resolvers
                .mutate_named("addOrRemoveFromCart", &json!({ "id": "42" }))
                .expect("Mutation failed");
            assert_eq!(second, json!([]));
        }

        it "rejects a mutation without an id" {
            let result = resolvers.mutate_named("addOrRemoveFromCart", &json!({}));
            assert!(matches!(result, Err(ResolveError::InvalidArgument(_))));
            assert!(store.cart_items().is_empty());
        }

        it "decorates server launches with virtual fields" {
            store.update_cart(|_| ids(&["2"]));
            let mut launches = vec![
                json!({ "id": "1", "site": "KSC LC 39A" }),
                json!({ "id": "2", "site": "VAFB SLC 4E" }),
            ];

            resolvers
                .decorate_all(&mut launches, &[VirtualField::IsInCart])
                .expect("Failed to decorate");

            assert_eq!(launches[0], json!({ "id": "1", "site": "KSC LC 39A", "isInCart": false }));
            assert_eq!(launches[1], json!({ "id": "2", "site": "VAFB SLC 4E", "isInCart": true }));
        }

        it "refuses to decorate a launch without an id" {
            let mut launch = json!({ "site": "KSC LC 39A" });
            let result = resolvers.decorate(&mut launch, &[VirtualField::IsInCart]);
            assert!(matches!(result, Err(ResolveError::InvalidArgument(_))));
        }

        it "sees toggles made through the store directly" {
            let launch = Launch::with_id("3");
            assert_eq!(resolvers.resolve_launch_field(VirtualField::IsInCart, &launch), json!(false));
            toggle_reservation(&"3".into(), &store);
            assert_eq!(resolvers.resolve_launch_field(VirtualField::IsInCart, &launch), json!(true));
        }
    }
}
