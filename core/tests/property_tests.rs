//! Property tests for request building.
//!
//! Every field must survive form encoding unchanged, and the PIN must follow
//! the directive regardless of what the caller supplied.

use proptest::prelude::*;
use remote_action_core::{AuthContext, LockDirective, RemoteActionClient, VehicleRef};

// Any printable text, including the characters form encoding has to escape.
fn arb_field() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ -~\u{e9}\u{4e2d}]{0,24}").unwrap()
}

fn arb_directive() -> impl Strategy<Value = LockDirective> {
    prop_oneof![Just(LockDirective::Lock), Just(LockDirective::Unlock)]
}

proptest! {
    /// Property: re-parsing the built query recovers each field verbatim.
    #[test]
    fn proptest_query_round_trip(
        username in arb_field(),
        pin in arb_field(),
        token in arb_field(),
        reg_id in arb_field(),
        vin in arb_field(),
        generation in arb_field(),
        directive in arb_directive(),
    ) {
        let auth = AuthContext::new(username.clone(), pin.clone(), token.clone());
        let vehicle = VehicleRef::new(reg_id.clone(), vin.clone(), generation.clone());

        let req = RemoteActionClient::default()
            .build_toggle_lock(&auth, &vehicle, directive)
            .unwrap();

        prop_assert_eq!(req.query_param("username"), Some(username));
        prop_assert_eq!(req.query_param("token"), Some(token));
        prop_assert_eq!(req.query_param("regId"), Some(reg_id));
        prop_assert_eq!(req.query_param("vin"), Some(vin));
        prop_assert_eq!(req.query_param("gen"), Some(generation));
        let service = req.query_param("service");
        prop_assert_eq!(service.as_deref(), Some(directive.service_token()));
        if directive == LockDirective::Unlock {
            prop_assert_eq!(req.query_param("pin"), Some(pin));
        }
    }

    /// Property: a lock never carries `pin`, however the PIN is set.
    #[test]
    fn proptest_lock_never_sends_pin(pin in arb_field()) {
        let auth = AuthContext::new("driver", pin, "token");
        let vehicle = VehicleRef::new("H1", "VIN", "2");

        let req = RemoteActionClient::default()
            .build_toggle_lock(&auth, &vehicle, LockDirective::Lock)
            .unwrap();

        prop_assert!(req.query_pairs().iter().all(|(key, _)| key != "pin"));
        prop_assert_eq!(req.query_pairs().len(), 7);
    }

    /// Property: an unlock carries exactly one `pin`.
    #[test]
    fn proptest_unlock_sends_pin_once(pin in arb_field()) {
        let auth = AuthContext::new("driver", pin.clone(), "token");
        let vehicle = VehicleRef::new("H1", "VIN", "2");

        let req = RemoteActionClient::default()
            .build_toggle_lock(&auth, &vehicle, LockDirective::Unlock)
            .unwrap();

        let pins: Vec<String> = req
            .query_pairs()
            .into_iter()
            .filter(|(key, _)| key == "pin")
            .map(|(_, value)| value)
            .collect();
        prop_assert_eq!(pins, vec![pin]);
    }
}
