use std::collections::BTreeMap;

use serde::Serialize;
use url::form_urlencoded;

use super::*;
use crate::error::EncodingError;

fn query_of(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}

#[test]
fn query_keys_are_sorted() -> Result<(), String> {
    let mut request = Request::new("sorted", Method::Get, "/");
    request.set_query(query_of(&[
        ("2", "b"),
        ("1", "a"),
        ("3", "c"),
        ("5", "e"),
        ("4", "d"),
    ]));

    let full = request.full_path();
    if full != "/?1=a&2=b&3=c&4=d&5=e" {
        return Err(format!("Unexpected full path: {}", full));
    }
    Ok(())
}

#[test]
fn query_is_percent_encoded() -> Result<(), String> {
    let query = query_of(&[("a", "b"), ("ké@lù", "ùl@ék")]);
    let encoded = encode_query(&query);
    if encoded != "?a=b&k%C3%A9%40l%C3%B9=%C3%B9l%40%C3%A9k" {
        return Err(format!("Unexpected query: {}", encoded));
    }
    Ok(())
}

#[test]
fn empty_query_has_no_question_mark() -> Result<(), String> {
    let request = Request::new("empty", Method::Get, "");
    if !encode_query(request.query()).is_empty() {
        return Err("Expected empty query string".to_owned());
    }
    if !request.full_path().is_empty() {
        return Err(format!("Expected empty full path, got {}", request.full_path()));
    }
    Ok(())
}

#[test]
fn encoded_query_decodes_back() -> Result<(), String> {
    let query = query_of(&[
        ("space key", "a b"),
        ("amp&", "x=y"),
        ("plus+", "100%"),
        ("slash/", "ü/ö?#"),
    ]);
    let encoded = encode_query(&query);
    let stripped = encoded
        .strip_prefix('?')
        .ok_or_else(|| format!("Missing '?' in {}", encoded))?;

    let decoded: BTreeMap<String, String> = form_urlencoded::parse(stripped.as_bytes())
        .into_owned()
        .collect();
    if decoded != query {
        return Err(format!("Round trip mismatch: {:?}", decoded));
    }

    let reencoded = encode_query(&decoded);
    if reencoded != encoded {
        return Err(format!("Re-encoding changed output: {}", reencoded));
    }
    Ok(())
}

#[test]
fn json_body_is_default() -> Result<(), String> {
    let mut request = Request::new("json", Method::Post, "/");
    request.add_header("Content-Type", "application/json");
    request.set_body(BTreeMap::from([("test", "message")]));

    let body = encode_body(&request).map_err(|err| err.to_string())?;
    if body.as_ref() != br#"{"test":"message"}"# {
        return Err(format!("Unexpected body: {:?}", body));
    }

    request.del_header("Content-Type");
    let body = encode_body(&request).map_err(|err| err.to_string())?;
    if body.as_ref() != br#"{"test":"message"}"# {
        return Err(format!("Unexpected body without content type: {:?}", body));
    }
    Ok(())
}

#[derive(Serialize)]
struct Greeting {
    message: String,
}

#[test]
fn xml_content_type_encodes_xml() -> Result<(), String> {
    let mut request = Request::new("xml", Method::Put, "/");
    request.add_header("Content-Type", "application/xml");
    request.set_body(Greeting {
        message: "hello".to_owned(),
    });

    let body = encode_body(&request).map_err(|err| err.to_string())?;
    let text = String::from_utf8(body.to_vec()).map_err(|err| err.to_string())?;
    if text != "<Greeting><message>hello</message></Greeting>" {
        return Err(format!("Unexpected XML body: {}", text));
    }
    Ok(())
}

#[test]
fn xml_content_type_needs_exact_value() -> Result<(), String> {
    let mut request = Request::new("near-xml", Method::Put, "/");
    request.add_header("Content-Type", "application/xml; charset=utf-8");
    request.set_body(Greeting {
        message: "hello".to_owned(),
    });

    let body = encode_body(&request).map_err(|err| err.to_string())?;
    if body.as_ref() != br#"{"message":"hello"}"# {
        return Err(format!("Expected JSON body, got {:?}", body));
    }
    Ok(())
}

/// Refuses to serialize, whatever the format.
struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(serde::ser::Error::custom("refused"))
    }
}

#[test]
fn unencodable_xml_body_is_encoding_error() -> Result<(), String> {
    let mut request = Request::new("bad-xml", Method::Post, "/");
    request.add_header("Content-Type", "application/xml");
    request.set_body(Unserializable);

    match encode_body(&request) {
        Err(EncodingError::Xml { .. }) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(body) => Err(format!("Expected XML encoding error, got {:?}", body)),
    }
}

#[test]
fn unencodable_json_body_is_encoding_error() -> Result<(), String> {
    let mut request = Request::new("bad-json", Method::Post, "/");
    request.set_body(Unserializable);

    match encode_body(&request) {
        Err(EncodingError::Json { .. }) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(body) => Err(format!("Expected JSON encoding error, got {:?}", body)),
    }
}

#[test]
fn raw_bytes_take_precedence() -> Result<(), String> {
    let mut request = Request::new("raw", Method::Post, "/");
    request.set_body(BTreeMap::from([("ignored", true)]));
    request.set_body_bytes("raw payload");

    let body = encode_body(&request).map_err(|err| err.to_string())?;
    if body.as_ref() != b"raw payload" {
        return Err(format!("Unexpected body: {:?}", body));
    }
    Ok(())
}

#[test]
fn no_body_is_empty() -> Result<(), String> {
    let request = Request::new("none", Method::Get, "/");
    let body = encode_body(&request).map_err(|err| err.to_string())?;
    if !body.is_empty() {
        return Err(format!("Expected empty body, got {:?}", body));
    }
    Ok(())
}

#[test]
fn header_lookup_ignores_case() -> Result<(), String> {
    let mut request = Request::new("headers", Method::Get, "/");
    request.add_header("X-Trace", "abc");
    if request.header("x-trace") != Some("abc") {
        return Err("Expected case-insensitive header lookup".to_owned());
    }
    request.add_header("X-Trace", "def");
    if request.header("X-Trace") != Some("def") || request.headers().len() != 1 {
        return Err("Expected later header value to overwrite".to_owned());
    }
    Ok(())
}

#[test]
fn method_names_are_uppercase() -> Result<(), String> {
    let methods = [
        (Method::Get, "GET"),
        (Method::Post, "POST"),
        (Method::Put, "PUT"),
        (Method::Patch, "PATCH"),
        (Method::Delete, "DELETE"),
        (Method::Options, "OPTIONS"),
        (Method::Head, "HEAD"),
    ];
    for (method, expected) in methods {
        if method.as_str() != expected || http::Method::from(method).as_str() != expected {
            return Err(format!("Unexpected name for {:?}", method));
        }
    }
    Ok(())
}

#[test]
fn request_set_tracks_names() -> Result<(), String> {
    let mut set: RequestSet = ["1", "2", "3", "4"]
        .into_iter()
        .map(|name| Request::new(name, Method::Get, "/"))
        .collect();

    if set.names() != ["1", "2", "3", "4"] {
        return Err(format!("Unexpected names: {:?}", set.names()));
    }

    drop(set.del_request("2"));
    if set.names() != ["1", "3", "4"] {
        return Err(format!("Unexpected names after delete: {:?}", set.names()));
    }
    if set.get_request("2").is_some() {
        return Err("Deleted request still present".to_owned());
    }
    Ok(())
}

#[test]
fn duplicate_name_replaces_request() -> Result<(), String> {
    let mut set = RequestSet::new();
    drop(set.add_request(Request::new("dup", Method::Get, "/first")));
    let replaced = set.add_request(Request::new("dup", Method::Post, "/second"));

    if replaced.map(|request| request.path().to_owned()).as_deref() != Some("/first") {
        return Err("Expected first request to be returned".to_owned());
    }
    let current = set
        .get_request("dup")
        .ok_or_else(|| "Missing request".to_owned())?;
    if current.path() != "/second" || current.method() != Method::Post || set.len() != 1 {
        return Err("Expected last write to win".to_owned());
    }
    Ok(())
}
