//! Tests for indentation measurement and rendering.

use pblocks_core::indent::{IndentConfig, IndentationSpec, measure, render};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case("code", 0, 0)]
#[case("    code", 0, 4)]
#[case("\t\tcode", 2, 0)]
#[case("\t  code", 1, 2)]
#[case("  \tcode", 1, 2)]
#[case("\t \t", 2, 1)]
#[case("  code  \t", 0, 2)]
fn test_measure(#[case] line: &str, #[case] tabs: usize, #[case] spaces: usize) {
    assert_eq!(measure(line), IndentationSpec { tabs, spaces });
}

#[rstest]
#[case(IndentationSpec { tabs: 2, spaces: 0 }, true, 4, "        ")]
#[case(IndentationSpec { tabs: 2, spaces: 0 }, false, 4, "\t\t")]
#[case(IndentationSpec { tabs: 1, spaces: 3 }, false, 8, "   \t")]
#[case(IndentationSpec { tabs: 1, spaces: 3 }, true, 2, "     ")]
#[case(IndentationSpec { tabs: 0, spaces: 0 }, true, 4, "")]
fn test_render(
    #[case] spec: IndentationSpec,
    #[case] insert_spaces: bool,
    #[case] tab_size: usize,
    #[case] expected: &str,
) {
    assert_eq!(render(spec, insert_spaces, tab_size), expected);
}

#[test]
fn test_spaces_stay_spaces_in_tab_mode() {
    let config = IndentConfig::new(false, 4);
    assert_eq!(config.reindent("        code"), "        ");
}

#[test]
fn test_default_config() {
    let config = IndentConfig::default();
    assert!(config.insert_spaces);
    assert_eq!(config.tab_size, 4);
}

proptest! {
    #[test]
    fn test_render_preserves_column_width(
        tabs in 0usize..5,
        spaces in 0usize..9,
        tab_size in 1usize..9,
        insert_spaces in any::<bool>(),
    ) {
        let line = format!("{}{}code", "\t".repeat(tabs), " ".repeat(spaces));
        let original = measure(&line);

        let rendered = render(original, insert_spaces, tab_size);
        let remeasured = measure(&rendered);

        prop_assert_eq!(remeasured.width(tab_size), original.width(tab_size));
        if insert_spaces {
            prop_assert_eq!(remeasured.tabs, 0);
        } else {
            prop_assert_eq!(remeasured, original);
        }
    }
}
