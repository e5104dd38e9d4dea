//! End-to-end checks of widget callbacks against a known bot token.

use loginwidget_auth::{AuthError, IdentityClaim};

const TOKEN: &str = "XXXXXXXX:XXXXXXXXXXXXXXXXXXXXXXXX";
const KLIM_HASH: &str = "b7a7fc776729077786e4190aec2c5dcecd2ec66ae0faf1b44316d541b955da95";

struct Case {
    name: &'static str,
    query: &'static str,
    decoded: Result<(), AuthError>,
    checked: Result<(), AuthError>,
}

fn cases() -> Vec<Case> {
    vec![
        Case {
            name: "ok",
            query: "auth_date=976255200&first_name=Klim&hash=b7a7fc776729077786e4190aec2c5dcecd2ec66ae0faf1b44316d541b955da95&id=1&last_name=Sidorov&photo_url=https%3A%2F%2Ft.me%2Fklimsidorov&username=klimsidorov",
            decoded: Ok(()),
            checked: Ok(()),
        },
        Case {
            name: "reused-hash",
            query: "auth_date=466251600&first_name=Pavel&hash=b7a7fc776729077786e4190aec2c5dcecd2ec66ae0faf1b44316d541b955da95&id=1&last_name=Durov&photo_url=https%3A%2F%2Ft.me%2Fdurov&username=durov",
            decoded: Ok(()),
            checked: Err(AuthError::SignatureInvalid),
        },
        Case {
            name: "missing-hash",
            query: "auth_date=466251600&first_name=Pavel&id=1&last_name=Durov&photo_url=https%3A%2F%2Ft.me%2Fdurov&username=durov",
            decoded: Err(AuthError::SignatureInvalid),
            checked: Err(AuthError::SignatureInvalid),
        },
        Case {
            name: "tampered-username",
            query: "auth_date=976255200&first_name=Klim&hash=b7a7fc776729077786e4190aec2c5dcecd2ec66ae0faf1b44316d541b955da95&id=1&last_name=Sidorov&photo_url=https%3A%2F%2Ft.me%2Fklimsidorov&username=durov",
            decoded: Ok(()),
            checked: Err(AuthError::SignatureInvalid),
        },
    ]
}

#[test]
fn query_cases() {
    for case in cases() {
        let decoded = IdentityClaim::from_query(case.query);
        assert_eq!(decoded.clone().map(|_| ()), case.decoded, "{}", case.name);

        let checked = decoded.and_then(|claim| claim.check(TOKEN));
        assert_eq!(checked, case.checked, "{}", case.name);
    }
}

#[test]
fn uri_cases() {
    for case in cases() {
        let uri = format!("https://example.com/?{}", case.query);
        let checked = IdentityClaim::from_uri(&uri).and_then(|claim| claim.check(TOKEN));
        assert_eq!(checked, case.checked, "{}", case.name);
    }
}

#[test]
fn decoded_claim_matches_fields() {
    let claim = IdentityClaim::from_query(cases()[0].query).unwrap();
    let expected = IdentityClaim::new()
        .with_auth_date(976_255_200)
        .with_first_name("Klim")
        .with_id(1)
        .with_last_name("Sidorov")
        .with_photo_url("https://t.me/klimsidorov")
        .with_username("klimsidorov")
        .with_signature(KLIM_HASH);
    assert_eq!(claim, expected);
}

#[test]
fn malformed_uri_is_not_a_signature_error() {
    let err = IdentityClaim::from_uri("https://exa mple.com/?hash=abc").unwrap_err();
    assert!(matches!(err, AuthError::MalformedInput(_)));
    assert!(!err.is_signature_invalid());
}

#[test]
fn json_callback_payload() {
    let payload = format!(
        r#"{{"id":1,"first_name":"Klim","last_name":"Sidorov","username":"klimsidorov","photo_url":"https://t.me/klimsidorov","auth_date":976255200,"hash":"{KLIM_HASH}"}}"#
    );
    let claim = IdentityClaim::from_json(&payload).unwrap();
    assert_eq!(claim.check(TOKEN), Ok(()));
}

#[test]
fn claims_are_shareable_across_threads() {
    let claim = IdentityClaim::from_query(cases()[0].query).unwrap();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| assert_eq!(claim.check(TOKEN), Ok(())));
        }
    });
}
