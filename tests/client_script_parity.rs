//! The generated client-side checks only call what the client script defines,
//! and a rendered form carries every check of its validator chain.

use std::collections::BTreeSet;
use std::sync::Arc;

use formkit::addressbook::{AddressBookApp, AddressForm, ChangeAddressForm};
use formkit::html::escape_html;
use formkit::prelude::*;
use formkit::script::CLIENT_SCRIPT;
use formkit::{Catalog, Request};
use regex::Regex;

fn called_methods(script: &str) -> BTreeSet<String> {
    let call = Regex::new(r"this\.([A-Za-z_]+)\(").unwrap();
    call.captures_iter(script).map(|c| c[1].to_string()).collect()
}

fn defined_methods() -> BTreeSet<String> {
    let definition = Regex::new(r"formkit\.Form\.prototype\.([A-Za-z_]+) = function").unwrap();
    definition
        .captures_iter(CLIENT_SCRIPT)
        .map(|c| c[1].to_string())
        .collect()
}

#[test]
fn generated_checks_only_call_defined_methods() {
    let catalog = Catalog::new();
    let defined = defined_methods();
    for validators in [AddressForm::validators(), ChangeAddressForm::validators()] {
        let script = validators.unwrap().script(&catalog);
        let called = called_methods(&script);
        assert!(!called.is_empty());
        for method in &called {
            assert!(defined.contains(method), "client script lacks {method}");
        }
    }
}

#[test]
fn client_script_defines_the_namespace() {
    assert!(CLIENT_SCRIPT.starts_with("var formkit = formkit || {};"));
    assert!(CLIENT_SCRIPT.contains("formkit.Form = function(form)"));
}

#[test]
fn add_page_form_carries_every_validator_script() {
    let catalog = Catalog::new();
    let mut ctx = RequestContext::new(Request::builder("GET", "/add").build(), Arc::new(catalog.clone()));
    let mut html = ctx.view::<AddressForm>(()).unwrap();
    let attrs = html.form_attrs().unwrap();

    assert!(attrs.starts_with(r#"onsubmit="return new formkit.Form(this).submit(function(){"#));
    for validator in AddressForm::validators().unwrap().iter() {
        if let Some(script) = validator.script(&catalog) {
            assert!(attrs.contains(&escape_html(&script)), "missing {script}");
        }
    }
}

#[test]
fn localized_messages_reach_the_client_checks() {
    let mut catalog = Catalog::new();
    catalog.add_message("formkit.validation.required", "Pflichtfeld");
    let script = AddressForm::validators().unwrap().script(&catalog);
    assert!(script.contains("var m = 'Pflichtfeld';"));
}

#[test]
fn application_serves_the_client_script() {
    let mut app = AddressBookApp::new(Arc::new(Catalog::new()), "");
    let response = app.handle(Request::builder("GET", "/formkit.js").build());
    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), CLIENT_SCRIPT);
    assert_eq!(response.header("cache-control"), Some("max-age=300"));
}
