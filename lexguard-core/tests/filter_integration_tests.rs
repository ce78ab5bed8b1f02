// lexguard-core/tests/filter_integration_tests.rs
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use test_log::test; // Routes `log` output through env_logger when RUST_LOG is set.

use lexguard_core::{
    BuildOptions, Category, CategoryOptions, ErrorPolicy, Filter, FilterSettings, Interner,
    LexguardError, MatcherBackend, PhraseScanner, RuleRegistry, ScanConfig,
};

fn default_filter() -> Filter {
    Filter::new(FilterSettings::default().build().unwrap()).unwrap()
}

const SAMPLES: &[&str] = &[
    "",
    "plain text",
    "h3ll0 w0rld",
    "ⓑⓐⓓ w\u{200b}ord",
    "Ｆｕｌｌｗｉｄｔｈ letters",
    "i <3 u :) ;-)",
    "$ecret c0de 4 you",
    "\u{0441}\u{0430}t and d\u{043e}g",
    "bad word actor and a bad word",
];

#[test]
fn test_normalization_is_idempotent() {
    let filter = default_filter();
    for sample in SAMPLES {
        let once = filter.normalize(sample);
        assert_eq!(filter.normalize(&once), once, "input {:?}", sample);
    }
}

#[test]
fn test_is_profane_matches_find_categories() {
    let mut filter = default_filter();
    filter
        .blacklist(1, ["bad word", "secret"])
        .unwrap()
        .blacklist(2, ["cat", "hello"])
        .unwrap()
        .whitelist(["bad word actor"])
        .unwrap();
    for sample in SAMPLES {
        assert_eq!(
            filter.is_profane(sample),
            !filter.find_categories(sample).is_empty(),
            "input {:?}",
            sample
        );
    }
    assert_eq!(filter.find_categories("bad word actor and a bad word"), vec![1]);
    assert_eq!(filter.find_categories("$ecret c0de"), vec![1]);
}

#[test]
fn test_matches_respect_window_bound() {
    let config = FilterSettings::default().with_max_window(2).build().unwrap();
    let mut filter: Filter = Filter::new(config).unwrap();
    filter
        .blacklist(1, ["a", "a b", "a b c", "c"])
        .unwrap();
    let matches = filter.scan("a b c a b");
    assert!(!matches.is_empty());
    for m in &matches {
        assert!(m.tokens <= 2);
        assert_ne!(m.phrase, "a b c");
    }
}

#[test]
fn test_basic_scan_reports_offsets() {
    let mut filter = default_filter();
    filter.blacklist(1, ["bad word"]).unwrap();
    let text = "this is a bad word here";
    let matches = filter.scan(text);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].phrase, "bad word");
    assert_eq!(matches[0].category, 1);
    assert_eq!((matches[0].start, matches[0].end), (10, 18));
}

#[test]
fn test_whitelist_scenarios() {
    let mut filter = default_filter();
    filter
        .blacklist(1, ["bad word"])
        .unwrap()
        .whitelist(["bad word actor"])
        .unwrap();
    assert!(filter.scan("bad word actor").is_empty());
    assert_eq!(filter.scan("bad word here").len(), 1);
}

#[test]
fn test_masking_replaces_exact_spans() {
    let mut scanner: PhraseScanner<u32> = PhraseScanner::new(
        ScanConfig::new(' ', NonZeroUsize::new(6).unwrap(), '*'),
        ErrorPolicy::default(),
    );
    scanner
        .index_mut()
        .blacklist("bad", 1)
        .unwrap()
        .blacklist("naïve phrase", 2)
        .unwrap();

    let text = "a naïve phrase is bad but not badly bad";
    let masked = scanner.mask(text);
    assert_eq!(masked, "a ************ is *** but not badly ***");
    assert_eq!(masked.chars().count(), text.chars().count());
    assert_eq!(scanner.find_categories(text), vec![2, 1, 1]);
}

#[test]
fn test_range_and_series_scenario() {
    let letters = Category::custom("letters");
    let mut registry = RuleRegistry::default();
    registry
        .add_range(&letters, "x", 'a' as u32, 'c' as u32)
        .unwrap()
        .add_series(&Category::Confusable, "e", ["3"])
        .unwrap();
    registry
        .build(&BuildOptions::new().with(letters.clone(), CategoryOptions::default_for(&Category::Number)))
        .unwrap();

    assert_eq!(registry.clean("abc", &[letters.clone()]), "xxx");
    assert_eq!(registry.clean("3lite", &[Category::Confusable]), "elite");
    assert_eq!(registry.clean("ab3c", &[letters, Category::Confusable]), "xxex");
}

#[test]
fn test_link_mirror_scenario() {
    let mirror = Category::custom("mirror");
    let mut registry = RuleRegistry::default();
    registry.add_links_mirror(&mirror, "z", [["a"], ["b"]]).unwrap();
    let options = CategoryOptions {
        wildcard: true,
        ..CategoryOptions::default()
    };
    registry.build(&BuildOptions::new().with(mirror.clone(), options)).unwrap();
    assert_eq!(registry.clean("aba", &[mirror]), "z");
}

#[test]
fn test_automaton_backend_matches_regex_backend_on_defaults() {
    let rules = lexguard_core::RuleSet::load_default().unwrap();
    let mut regex_registry = RuleRegistry::default();
    rules.apply(&mut regex_registry).unwrap();
    regex_registry.build(&BuildOptions::new()).unwrap();

    let mut automaton_registry = RuleRegistry::default();
    rules.apply(&mut automaton_registry).unwrap();
    let mut options = BuildOptions::new();
    for category in [Category::Emoji, Category::Confusable, Category::Invisible, Category::Number] {
        let mut o = CategoryOptions::default_for(&category);
        o.backend = MatcherBackend::Automaton;
        options = options.with(category, o);
    }
    automaton_registry.build(&options).unwrap();
    assert!(automaton_registry
        .matchers()
        .get(&Category::Number)
        .unwrap()
        .is_automaton());

    for sample in SAMPLES {
        assert_eq!(
            regex_registry.clean_default(sample),
            automaton_registry.clean_default(sample),
            "input {:?}",
            sample
        );
    }
}

#[test]
fn test_interner_identity_and_eviction_scenario() {
    let mut interner = Interner::with_capacity(NonZeroUsize::new(2).unwrap());
    let mut computed: HashMap<String, usize> = HashMap::new();

    let a1 = interner.intern("a");
    let b1 = interner.intern("b");
    let b2 = interner.intern("b");
    assert!(Arc::ptr_eq(&b1, &b2));
    for handle in [&b1, &b2] {
        handle.derived_or_init(|s| {
            *computed.entry(s.to_string()).or_default() += 1;
            s.to_uppercase()
        });
    }
    assert_eq!(computed["b"], 1);

    interner.intern("c");
    let a2 = interner.intern("a");
    assert!(!Arc::ptr_eq(&a1, &a2));
}

#[test]
fn test_strict_and_permissive_errors() {
    let mut strict: Filter = default_filter();
    assert!(matches!(
        strict.blacklist_remove(["never added"]),
        Err(LexguardError::NotFound { .. })
    ));
    assert!(matches!(
        strict.blacklist(1, [""]),
        Err(LexguardError::Validation(_))
    ));

    let config = FilterSettings::default()
        .with_errors(ErrorPolicy::permissive())
        .build()
        .unwrap();
    let mut lenient: Filter = Filter::new(config).unwrap();
    lenient
        .blacklist(1, ["", "ok"])
        .unwrap()
        .blacklist_remove(["never added"])
        .unwrap();
    assert_eq!(lenient.phrases().blacklist_len(), 1);
}

#[test]
fn test_filter_is_shareable_across_threads() {
    let mut filter = default_filter();
    filter.blacklist(1, ["bad"]).unwrap();
    let filter = Arc::new(filter);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let filter = Arc::clone(&filter);
            std::thread::spawn(move || filter.is_profane(&format!("b4d {}", i)))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
