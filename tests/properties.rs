use bem_class_names as bem;
use bem::{block, ModValue, Mods};
use proptest::prelude::*;

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,8}"
}

proptest! {
    #[test]
    fn bare_block_renders_its_name(n in "\\PC*") {
        prop_assert_eq!(block(&n).to_string(), n);
    }

    #[test]
    fn element_uses_default_separator(n in ident(), e in ident()) {
        prop_assert_eq!(block(&n).elem(&e).to_string(), format!("{n}__{e}"));
    }

    #[test]
    fn flag_modifier(n in ident(), k in ident()) {
        prop_assert_eq!(
            block(&n).mods([(k.as_str(), true)]).to_string(),
            format!("{n} {n}_{k}")
        );
    }

    #[test]
    fn value_modifier(n in ident(), k in ident(), v in 1i64..10_000) {
        let classes = block(&n).mods([(k.as_str(), v)]).classes();
        let expected = format!("{n}_{k}_{v}");
        prop_assert!(classes.contains(&expected));
    }

    #[test]
    fn derived_blocks_do_not_touch_the_original(n in ident(), x in ident(), y in ident()) {
        let b = block(&n).mix("m");
        let before = b.to_string();
        let one = b.elem(&x);
        let two = b.mods(Mods::new().set(y.as_str(), ModValue::from(true)));
        prop_assert_eq!(b.to_string(), before);
        prop_assert_eq!(one.to_string(), format!("{n}__{x} m"));
        prop_assert_eq!(two.to_string(), format!("{n} {n}_{y} m"));
    }

    #[test]
    fn split_matches_string_split(n in ident(), mixes in prop::collection::vec(ident(), 0..4)) {
        let b = block(&n).mix(mixes).state([("open", true)]);
        let expected: Vec<String> = b.to_string().split(' ').map(str::to_string).collect();
        prop_assert_eq!(b.split(Some(" "), None), expected);
    }
}
