use serde::{Deserialize, Serialize};

/// A JSON Web Key Set, as served by a JWKS endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
    #[serde(default)]
    pub keys: Vec<Jwk>,
}

/// A single JSON Web Key.
///
/// The key material (`n`, `e`) is kept as the opaque strings the endpoint
/// published. Missing fields decode to empty values, unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Jwk {
    pub kty: String,
    pub kid: String,
    #[serde(rename = "use")]
    pub key_use: String,
    pub n: String,
    pub e: String,
    /// Base64 encoded X.509 certificate chain, leaf certificate first.
    pub x5c: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};
    use insta::assert_debug_snapshot;

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let json = r#"{
            "keys": [{
                "kty": "RSA",
                "alg": "RS256",
                "use": "sig",
                "kid": "c0ffee",
                "n": "hu2WuyS2Iza1itnQ5dR4",
                "e": "AQAB",
                "x5c": ["AAAA", "BBBB"],
                "x5t": "ykNaY4qM_ta4k2TgZOCEYLkcYlA"
            }]
        }"#;

        let jwks: JwkSet = assert_ok!(serde_json::from_str(json));
        assert_debug_snapshot!(jwks, @r#"
        JwkSet {
            keys: [
                Jwk {
                    kty: "RSA",
                    kid: "c0ffee",
                    key_use: "sig",
                    n: "hu2WuyS2Iza1itnQ5dR4",
                    e: "AQAB",
                    x5c: [
                        "AAAA",
                        "BBBB",
                    ],
                },
            ],
        }
        "#);
    }

    #[test]
    fn test_decode_missing_fields() {
        let jwks: JwkSet = assert_ok!(serde_json::from_str(r#"{"keys": [{"kid": "c0ffee"}]}"#));
        let expected = Jwk {
            kid: "c0ffee".into(),
            ..Default::default()
        };
        assert_eq!(jwks.keys, vec![expected]);

        let jwks: JwkSet = assert_ok!(serde_json::from_str("{}"));
        assert!(jwks.keys.is_empty());
    }

    #[test]
    fn test_decode_type_mismatch() {
        assert_err!(serde_json::from_str::<JwkSet>(r#"{"keys": {}}"#));
        assert_err!(serde_json::from_str::<JwkSet>(r#"{"keys": [{"kid": 42}]}"#));
        assert_err!(serde_json::from_str::<JwkSet>(r#"{"keys": [{"x5c": "AAAA"}]}"#));
        assert_err!(serde_json::from_str::<JwkSet>("null"));
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let jwk = Jwk {
            kty: "RSA".into(),
            kid: "c0ffee".into(),
            key_use: "sig".into(),
            n: "n".into(),
            e: "AQAB".into(),
            x5c: vec!["AAAA".into()],
        };

        let json = assert_ok!(serde_json::to_string(&jwk));
        assert_eq!(
            json,
            r#"{"kty":"RSA","kid":"c0ffee","use":"sig","n":"n","e":"AQAB","x5c":["AAAA"]}"#
        );
    }
}
