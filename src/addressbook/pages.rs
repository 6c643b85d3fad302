use std::fmt::Write as _;

use super::{AddressBook, AddressForm, ChangeAddressForm};
use crate::{FormError, Html, RequestContext, Response};

const COUNTRIES: &[(&str, &str)] = &[("germany", "Germany"), ("uk", "United Kingdom")];

fn layout(html: &Html<'_>, title: &str, content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>{title}</title>\n\
         <script src=\"{script}\"></script>\n</head>\n<body>\n<h2>{title}</h2>\n{content}</body>\n</html>\n",
        title = html.text(title),
        script = html.url("formkit.js"),
    )
}

fn notices(ctx: &RequestContext) -> String {
    if !ctx.notices().has_errors() {
        return String::new();
    }
    let items: String = ctx
        .notices()
        .errors()
        .iter()
        .map(|message| format!("<li>{}</li>", crate::html::escape_html(message)))
        .collect();
    format!("<ul class=\"notices\">{items}</ul>\n")
}

/// Markup of the fields shared by the add and the edit page.
fn address_fields(html: &mut Html<'_>) -> Result<String, FormError> {
    let mut out = String::from("<div class=\"fields\">\n");
    let inputs = [
        ("firstName", "First name"),
        ("lastName", "Last name"),
        ("street", "Street"),
        ("zipCode", "ZIP code"),
        ("city", "City"),
    ];
    for (index, (name, caption)) in inputs.into_iter().enumerate() {
        html.bind_field(name, None)?;
        let focus = if index == 0 { html.auto_focus()? } else { "" };
        let _ = write!(
            out,
            "<label {}>{caption}</label>\n<input type=\"text\" {}{focus} />\n{}\n",
            html.label()?,
            html.input()?,
            html.messages()?,
        );
    }

    html.bind_field("country", None)?;
    let _ = write!(
        out,
        "<label {}>Country</label>\n<select {}>\n{}</select>\n{}\n",
        html.label()?,
        html.select()?,
        html.options(COUNTRIES)?,
        html.messages()?,
    );

    html.bind_field("gender", None)?;
    let _ = write!(
        out,
        "<div class=\"radio\">\n<input {} />\n<label for=\"gender-male\">Male</label>\n\
         <input {} />\n<label for=\"gender-female\">Female</label>\n</div>\n{}\n",
        html.radio("male")?,
        html.radio("female")?,
        html.messages()?,
    );

    html.bind_field("public", None)?;
    let _ = write!(
        out,
        "<div class=\"checkbox\">\n<input {} />\n<label {}>Public</label>\n</div>\n{}\n",
        html.checkbox()?,
        html.label()?,
        html.messages()?,
    );
    html.unbind_field();
    out.push_str("</div>\n");
    Ok(out)
}

/// The address listing.
pub fn list_page(ctx: &RequestContext, book: &AddressBook) -> Result<Response, FormError> {
    let html = ctx.html();
    let mut content = notices(ctx);
    content.push_str("<ul class=\"addresses\">\n");
    for address in book.all() {
        let id = address.id().unwrap_or_default();
        let _ = writeln!(
            content,
            "<li><a href=\"{}\">{}, {}</a></li>",
            html.url(&format!("address?id={id}")),
            html.text(&address.last_name),
            html.text(&address.first_name),
        );
    }
    let _ = write!(
        content,
        "</ul>\n<div class=\"buttons\">\n<a href=\"{}\">Add address</a>\n</div>\n",
        html.url("add")
    );
    Ok(Response::html(layout(&html, "Address List", &content)))
}

/// The form for a new address.
pub fn add_page(ctx: &mut RequestContext) -> Result<Response, FormError> {
    let mut html = ctx.view::<AddressForm>(())?;
    let form_attrs = html.form_attrs()?;
    let fields = address_fields(&mut html)?;
    let content = format!(
        "<form action=\"{action}\" method=\"post\" novalidate {form_attrs}>\n{fields}\
         <div class=\"buttons\">\n<input type=\"submit\" value=\"Add address\" />\n\
         <a href=\"{cancel}\">Cancel</a>\n</div>\n</form>\n",
        action = html.url("actions/add"),
        cancel = html.url("index"),
    );
    Ok(Response::html(layout(&html, "Add Address", &content)))
}

/// The form for changing the address named by the `id` parameter.
pub fn edit_page(ctx: &mut RequestContext, book: &AddressBook) -> Result<Response, FormError> {
    let id = ctx.request().param_or("id", "").to_string();
    let Ok(numeric_id) = id.trim().parse::<u64>() else {
        return Ok(Response::text(404, format!("No address with ID {id} found")));
    };
    let address = book.get(numeric_id)?.clone();

    let mut html = ctx.view::<ChangeAddressForm>(address)?;
    let form_attrs = html.form_attrs()?;
    html.bind_field("id", None)?;
    let hidden = html.input()?;
    html.unbind_field();
    let fields = address_fields(&mut html)?;
    let content = format!(
        "<form action=\"{action}\" method=\"post\" novalidate {form_attrs}>\n\
         <input type=\"hidden\" {hidden} />\n{fields}\
         <div class=\"buttons\">\n<input type=\"submit\" value=\"Save changes\" />\n\
         <a href=\"{cancel}\">Cancel</a>\n<a href=\"{delete}\">Delete address</a>\n</div>\n</form>\n",
        action = html.url("actions/change"),
        cancel = html.url("index"),
        delete = html.url(&format!("actions/delete?id={numeric_id}")),
    );
    Ok(Response::html(layout(&html, "Address", &content)))
}
