//! End-to-end tests for Block rendering.
//!
//! Run with: RUST_LOG=debug cargo test --test e2e_block -- --nocapture

mod common;

use common::{init_test_logging, lines, pipe_config, test_phase, tty_config};
use serial_test::serial;
use term_layout::config;
use term_layout::prelude::*;

fn status_block(config: &RenderConfig) -> Block {
    let services = Table::from_rows([
        ["esm-apps", "yes", "enabled", "Expanded Security Maintenance for Applications"],
        ["livepatch", "yes", "disabled", "Canonical Livepatch service"],
    ])
    .and_then(|table| table.with_headers(["SERVICE", "ENTITLED", "STATUS", "DESCRIPTION"]))
    .expect("valid table");

    Block::new(bold(config, "Subscription"))
        .with(format!(
            "Visit {} to manage your subscription and attached machines.",
            create_link(config, "the portal", "https://example.com/portal")
        ))
        .with(services)
        .with(
            Block::new("Notices")
                .with(red(config, "Operation in progress"))
                .with("Reboot required to finish applying updates to the kernel."),
        )
}

#[test]
fn e2e_block_tty_rendering() {
    init_test_logging();
    let config = tty_config(50);

    let setup = test_phase("render");
    let output = status_block(&config).render(&config, None);
    drop(setup);
    tracing::debug!(output = %output, "rendered block");

    let link = "\x1b]8;;https://example.com/portal\x1b\\the portal\x1b]8;;\x1b\\";
    // Continuation rows leave the first three columns (31 cells) blank.
    let cont = |text: &str| format!("{:35}{text}", "");
    let expected = lines(&[
        "\x1b[1mSubscription\x1b[0m",
        &format!("    Visit {link} to manage your subscription"),
        "    and attached machines.",
        "    \x1b[1mSERVICE    ENTITLED  STATUS    DESCRIPTION\x1b[0m",
        "    esm-apps   yes       enabled   Expanded",
        &cont("Security"),
        &cont("Maintenance for"),
        &cont("Applications"),
        "    livepatch  yes       disabled  Canonical",
        &cont("Livepatch"),
        &cont("service"),
        "    Notices",
        "        \x1b[91mOperation in progress\x1b[0m",
        "        Reboot required to finish applying",
        "        updates to the kernel.",
    ]);
    assert_eq!(output, expected);
}

#[test]
fn e2e_block_pipe_rendering_is_plain_and_unwrapped() {
    init_test_logging();
    let config = pipe_config();
    let output = status_block(&config).render(&config, None);

    assert!(!output.contains('\x1b'), "no escapes expected: {output:?}");
    let right = |a: &str, b: &str, c: &str, d: &str| {
        format!("    {a:>9}  {b:>8}  {c:>8}  {d:>46}")
    };
    assert_eq!(
        output,
        lines(&[
            "Subscription",
            "    Visit the portal to manage your subscription and attached machines.",
            &right("SERVICE", "ENTITLED", "STATUS", "DESCRIPTION"),
            &right("esm-apps", "yes", "enabled", "Expanded Security Maintenance for Applications"),
            &right("livepatch", "yes", "disabled", "Canonical Livepatch service"),
            "    Notices",
            "        Operation in progress",
            "        Reboot required to finish applying updates to the kernel.",
        ])
    );
}

#[test]
fn e2e_block_every_line_fits_budget() {
    init_test_logging();
    let config = tty_config(80);
    let block = status_block(&config);
    // Widths below 50 cannot fit the fixed table columns.
    for width in [50, 60, 80] {
        let output = block.render(&config, Some(width));
        for line in output.lines() {
            let words_fit = line
                .split_whitespace()
                .all(|word| visual_width(word) <= width);
            if words_fit {
                assert!(
                    visual_width(line) <= width,
                    "line {line:?} wider than {width}"
                );
            }
        }
    }
}

#[test]
fn e2e_block_untitled_nested_blocks() {
    init_test_logging();
    let block = Block::untitled()
        .with(Block::untitled().with("depth two"))
        .with("depth one");
    assert_eq!(
        block.render(&pipe_config(), None),
        lines(&["        depth two", "    depth one"])
    );
}

#[test]
#[serial]
fn e2e_block_display_uses_global_config() {
    init_test_logging();
    config::init_with(pipe_config());
    let block = Block::new("Title").with("some content that stays on one line");
    assert_eq!(
        block.to_string(),
        "Title\n    some content that stays on one line\n"
    );
    config::reset();
}
