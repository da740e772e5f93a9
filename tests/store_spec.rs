use launchpad::models::LaunchId;
use launchpad::store::*;
use speculate2::speculate;

fn ids(raw: &[&str]) -> Vec<LaunchId> {
    raw.iter().map(|s| LaunchId::from(*s)).collect()
}

speculate! {
    before {
        let store = LocalStore::new();
    }

    describe "initialize" {
        it "seeds both keys" {
            store.initialize(LocalState {
                is_logged_in: true,
                cart_items: ids(&["1", "2"]),
            }).expect("Failed to initialize");

            assert!(store.is_initialized());
            assert_eq!(store.get(LocalKey::IsLoggedIn), Some(LocalValue::Bool(true)));
            assert_eq!(store.get(LocalKey::CartItems), Some(LocalValue::Ids(ids(&["1", "2"]))));
        }

        it "defaults to logged out with an empty cart" {
            store.initialize(LocalState::default()).expect("Failed to initialize");

            assert_eq!(store.get(LocalKey::IsLoggedIn), Some(LocalValue::Bool(false)));
            assert_eq!(store.get(LocalKey::CartItems), Some(LocalValue::Ids(vec![])));
        }

        it "refuses a second call" {
            store.initialize(LocalState::default()).expect("Failed to initialize");
            let result = store.initialize(LocalState {
                is_logged_in: true,
                cart_items: ids(&["9"]),
            });

            assert_eq!(result, Err(StoreError::AlreadyInitialized));
            assert!(!store.is_logged_in());
            assert!(store.cart_items().is_empty());
        }
    }

    describe "get and set" {
        it "reads absent keys as None before initialization" {
            assert_eq!(store.get(LocalKey::CartItems), None);
            assert_eq!(store.snapshot(), LocalState::default());
        }

        it "observes the latest write immediately" {
            store.initialize(LocalState::default()).expect("Failed to initialize");
            store.set(LocalKey::CartItems, LocalValue::Ids(ids(&["5"]))).expect("Failed to set");
            assert_eq!(store.cart_items(), ids(&["5"]));

            store.set(LocalKey::CartItems, LocalValue::Ids(ids(&["6", "5"]))).expect("Failed to set");
            assert_eq!(store.cart_items(), ids(&["6", "5"]));
        }

        it "removes duplicate ids on write" {
            store.set(LocalKey::CartItems, LocalValue::Ids(ids(&["1", "1", "2", "1"]))).expect("Failed to set");
            assert_eq!(store.cart_items(), ids(&["1", "2"]));
        }

        it "rejects a flag written to the cart" {
            let result = store.set(LocalKey::CartItems, LocalValue::Bool(true));
            assert!(matches!(result, Err(StoreError::TypeMismatch { key: LocalKey::CartItems, .. })));
        }
    }

    describe "credentials" {
        before {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let tokens = TokenStore::new(dir.path().join("launchpad").join("token"));
        }

        it "seeds logged in when a token is stored" {
            tokens.save("abc123").expect("Failed to save token");
            store.initialize(seed_state(&tokens, vec![])).expect("Failed to initialize");
            assert!(store.is_logged_in());
        }

        it "seeds logged out without a token" {
            store.initialize(seed_state(&tokens, ids(&["3"]))).expect("Failed to initialize");
            assert!(!store.is_logged_in());
            assert_eq!(store.cart_items(), ids(&["3"]));
        }

        it "login writes the token and raises the flag" {
            store.initialize(seed_state(&tokens, vec![])).expect("Failed to initialize");
            login(&store, &tokens, "abc123").expect("Failed to log in");

            assert!(store.is_logged_in());
            assert!(tokens.has_token());
        }

        it "logout clears the token, the flag and the cart" {
            tokens.save("abc123").expect("Failed to save token");
            store.initialize(seed_state(&tokens, ids(&["1"]))).expect("Failed to initialize");
            logout(&store, &tokens).expect("Failed to log out");

            assert!(!store.is_logged_in());
            assert!(!tokens.has_token());
            assert!(store.cart_items().is_empty());
        }
    }
}
