//! End-to-end imports of tab-delimited exports.

mod common;

use common::fixtures::text_export;
use common::{import_args, TestContext, DECK};
use pleco_core::types::FIELD_NAMES;
use pleco_core::{ImportError, NoteStore, ParseError};
use pleco_import::cli::FormatArg;
use pleco_import::commands::import_export;
use pretty_assertions::assert_eq;

#[test]
fn user_lines_become_custom_notes() {
    let ctx = TestContext::new();
    let file = ctx.write_export(
        "flash.txt",
        &text_export(&[
            ("你好", "ni3 hao3", "hello"),
            ("谢谢[謝謝]", "xie4 xie5", "thanks"),
        ]),
    );

    let summary = import_export(ctx.db_path(), &ctx.catalog, &import_args(&file)).unwrap();
    assert_eq!(summary.parsed, 2);
    assert_eq!(summary.created, 2);

    let mut store = ctx.store();
    let user_type = store.ensure_note_type(&ctx.catalog.user, &FIELD_NAMES).unwrap();
    let ids = store.find_records("谢谢", user_type, DECK).unwrap();
    assert_eq!(ids.len(), 1);
    let fields = store.note_fields(ids[0]).unwrap().unwrap();
    assert_eq!(fields.get("pron"), Some("xiè xie"));
    assert_eq!(fields.get("defn"), Some("thanks"));
}

#[test]
fn header_and_blank_lines_are_ignored() {
    let ctx = TestContext::new();
    let content = format!(
        "// Pleco flashcards\n\n{}",
        text_export(&[("中国", "zhong1 guo2", "China")])
    );
    let file = ctx.write_export("flash.txt", &content);

    let summary = import_export(ctx.db_path(), &ctx.catalog, &import_args(&file)).unwrap();
    assert_eq!(summary.parsed, 1);
    assert_eq!(ctx.store().note_count().unwrap(), 1);
}

#[test]
fn single_syllable_line_is_rejected_and_nothing_written() {
    let ctx = TestContext::new();
    let file = ctx.write_export(
        "flash.txt",
        &text_export(&[("你好", "ni3 hao3", "hello"), ("爱", "ai4", "to love")]),
    );

    let error = import_export(ctx.db_path(), &ctx.catalog, &import_args(&file)).unwrap_err();
    match error.downcast_ref::<ImportError>() {
        Some(ImportError::Parse(ParseError::UnsupportedLine { line, .. })) => assert_eq!(*line, 2),
        other => panic!("expected unsupported line, got {other:?}"),
    }
    assert_eq!(ctx.store().note_count().unwrap(), 0);
}

#[test]
fn explicit_format_overrides_extension() {
    let ctx = TestContext::new();
    let file = ctx.write_export("flash.export", &text_export(&[("你好", "ni3 hao3", "hello")]));

    let mut args = import_args(&file);
    assert!(import_export(ctx.db_path(), &ctx.catalog, &args).is_err());

    args.format = FormatArg::Text;
    let summary = import_export(ctx.db_path(), &ctx.catalog, &args).unwrap();
    assert_eq!(summary.created, 1);
}
