//! Layout of the generated route table.
//!
//! The route table is a C++ fragment meant to be `#include`d inside the
//! initializer list of device router slots, eg.
//! ```text
//! const auto routes = std::to_array<const router_slot>({
//!     {"/"sv, "GET"sv, handle_root},
//! #include "static_routes.h"
//! });
//! ```
//! Each generated line looks like:
//! ```text
//!     {"/index.html"sv, "GET"sv, [](WiFiClient& client, HttpRequest& request) { serve_static(client, request, "\x1f\x8b..."sv); }},
//! ```

/// First line of every generated table.
pub const HEADER: &str = "// Generated by www-pack-packer. Do not edit.";
/// Prefix of every line with a table entry.
pub const ENTRY_INDENT: &str = "    ";
/// Signature of the lambda wrapping the serve call.
pub const HANDLER_SIGNATURE: &str = "[](WiFiClient& client, HttpRequest& request)";
/// Arguments forwarded from the lambda to the serve function, before the
/// payload.
pub const HANDLER_ARGUMENTS: &str = "client, request";
/// Name of the device function serving gzipped payload, used if not
/// overridden.
pub const HANDLER_DEFAULT: &str = "serve_static";

/// C++ reserved words, not usable as identifiers.
const KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

/// Checks whether `name` can be used as a handler (C/C++ identifier, not a
/// reserved word).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|character| character == '_' || character.is_ascii_alphanumeric())
        && !KEYWORDS.contains(&name)
}
