//! Behaviour scenarios for binding, lookup and mutation

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;
use std::time::Duration;

use fos_bind::{
    Behavior, Binding, BindingPropagation, ComponentId, ContainerId, Document, Registry, RunContext, Update,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.bind("x").bind("y").bind("z").bind("s");
    registry
}

fn document() -> Document {
    init_tracing();
    Document::new(registry())
}

fn div(name: &str, content: &str) -> String {
    format!(r#"<div class="{name}">{content}</div>"#)
}

fn s(content: &str) -> String {
    div("s", content)
}

fn x(content: &str) -> String {
    div("x", content)
}

fn y(content: &str) -> String {
    div("y", content)
}

fn z(content: &str) -> String {
    div("z", content)
}

/// Text of a component's element
fn text(doc: &Document, component: ComponentId) -> String {
    doc.tree().text_content(doc.component_node(component))
}

fn texts(doc: &Document, components: &[ComponentId]) -> Vec<String> {
    components.iter().map(|&c| text(doc, c)).collect()
}

fn append(doc: &mut Document, scope: ContainerId, markup: &str) -> ComponentId {
    doc.append_markup(scope, markup).unwrap().unwrap()
}

fn append_container(doc: &mut Document, scope: ContainerId, markup: &str) -> ContainerId {
    let component = append(doc, scope, markup);
    doc.container_of(component)
}

fn container(doc: &Document, scope: ContainerId, name: &str) -> ContainerId {
    doc.container_of(doc.lookup(scope, name).unwrap())
}

#[test]
fn test_load_is_detached() {
    let mut doc = document();
    let loaded = doc.load(r#"<div id="x"></div>"#).unwrap().unwrap();
    let c = doc.container_of(loaded);
    assert_eq!(doc.tree().element(doc.node_of(c)).map(|e| e.tag.as_str()), Some("div"));
    assert!(!doc.is_attached(c));
    assert_eq!(doc.lookup(doc.root(), "x"), None);
}

#[test]
fn test_identified_by_id_or_class() {
    let mut doc = document();
    let root = doc.root();
    append(&mut doc, root, r#"<span id="x">..</span>"#);
    append(&mut doc, root, r#"<span class="x">..</span>"#);
    assert_eq!(doc.collect(root, "x").len(), 2);
}

#[test]
fn test_cannot_remove_id() {
    let mut doc = document();
    let root = doc.root();
    append(&mut doc, root, r#"<span id="x" class="y z">...</span>"#);
    let c = container(&doc, root, "y");

    assert!(doc.remove_name(c, "z"));
    assert!(!doc.remove_name(c, "x"));
    assert_eq!(doc.tree().get_attr(doc.node_of(c), "class"), Some("y"));
    assert_eq!(container(&doc, root, "x"), c);
    assert_eq!(doc.names(c).to_string(), "x y");
}

#[test]
fn test_add_class_name() {
    let mut doc = document();
    let root = doc.root();
    append(&mut doc, root, r#"<span id="x" class="y">...</span>"#);
    let c = container(&doc, root, "x");

    assert!(doc.apply(c, "z"));
    assert_eq!(doc.tree().get_attr(doc.node_of(c), "class"), Some("z y"));
}

#[test]
fn test_duplicate_names_and_whitespace() {
    let mut doc = document();
    let root = doc.root();
    append(&mut doc, root, &div(" x x y ", ""));
    let c = container(&doc, root, "x");
    assert_eq!(doc.names(c).to_string(), "x y");
    assert_eq!(doc.collect(root, "x").len(), 1);
}

#[test]
fn test_access_to_containing_components() {
    let mut doc = document();
    let root = doc.root();
    let cx = append(&mut doc, root, &x(&y(&z(""))));
    let cy = doc.get_component(cx, "y").unwrap();
    let cz = doc.get_component(cy, "z").unwrap();

    assert_eq!(doc.get_component(cz, "y"), Some(cy));
    assert_eq!(doc.get_component(cy, "x"), Some(cx));
    assert_eq!(doc.container_of(cx), container(&doc, root, "x"));
}

#[test]
fn test_first_instance_of_sub_component() {
    let mut doc = document();
    let root = doc.root();
    let cx = append(&mut doc, root, &(x(&(s("a") + &s("b")))));
    append(&mut doc, root, &s("c"));
    let xc = doc.container_of(cx);

    assert_eq!(text(&doc, doc.get_component(cx, "s").unwrap()), "a");
    assert_eq!(text(&doc, doc.lookup(root, "s").unwrap()), "c");
    assert_eq!(texts(&doc, &doc.collect(root, "s")), ["a", "b", "c"]);
    assert_eq!(texts(&doc, &doc.collect(xc, "s")), ["a", "b"]);
}

#[test]
fn test_subtree_has_precedence_over_containers() {
    init_tracing();
    let mut registry = Registry::new();
    registry.bind("list").bind("item");
    let doc = Document::parse(registry, &div("list", &div("item", &div("list", "")))).unwrap();

    let list = doc.lookup(doc.root(), "list").unwrap();
    let item = doc.get_component(list, "item").unwrap();
    let inner = doc.get_component(item, "list").unwrap();
    assert_ne!(inner, list);
    assert_eq!(doc.get_component(inner, "item"), Some(item));
}

#[test]
fn test_removal_promotes_next_instance() {
    let mut doc = document();
    let root = doc.root();
    let one = append(&mut doc, root, &s("one"));
    append(&mut doc, root, &s("two"));

    doc.remove_component(one);
    assert_eq!(text(&doc, doc.lookup(root, "s").unwrap()), "two");
}

#[test]
fn test_insert_before_takes_over_name() {
    let mut doc = document();
    let root = doc.root();
    let two = append(&mut doc, root, &s("two"));
    doc.insert_markup(root, &s("one"), Some(doc.container_of(two))).unwrap();

    assert_eq!(text(&doc, doc.lookup(root, "s").unwrap()), "one");
    assert_eq!(texts(&doc, &doc.collect(root, "s")), ["one", "two"]);
}

#[test]
fn test_later_sibling_does_not_take_over() {
    let mut doc = document();
    let root = doc.root();
    append(&mut doc, root, &x(&s("a")));
    let c = append(&mut doc, root, &s("c"));
    append(&mut doc, root, &s("d"));
    assert_eq!(text(&doc, doc.lookup(root, "s").unwrap()), "c");

    let d = doc.next_component(c).unwrap();
    assert!(doc.append(root, doc.container_of(c)));
    assert_eq!(doc.lookup(root, "s"), Some(d));

    doc.insert_markup(root, &s("b"), Some(doc.container_of(d))).unwrap();
    assert_eq!(text(&doc, doc.lookup(root, "s").unwrap()), "b");
    assert_eq!(texts(&doc, &doc.collect(root, "s")), ["a", "b", "d", "c"]);
}

#[test]
fn test_first_and_last_descendant() {
    let mut doc = document();
    let root = doc.root();
    append(&mut doc, root, &x(&(y(&s("one")) + &y(&z(&s("two"))))));
    assert_eq!(text(&doc, doc.first(root, "s").unwrap()), "one");
    assert_eq!(text(&doc, doc.last(root, "s").unwrap()), "two");
}

#[test]
fn test_insert_in_same_position_using_next() {
    let mut doc = document();
    let root = doc.root();
    let one = append(&mut doc, root, &s("one"));
    let two = append(&mut doc, root, &s("two"));

    let (one_c, two_c) = (doc.container_of(one), doc.container_of(two));
    assert!(!doc.insert(root, one_c, Some(two_c)));
    assert_eq!(texts(&doc, &doc.collect(root, "s")), ["one", "two"]);
    assert_eq!(doc.next_component(one), Some(two));
}

#[test]
fn test_append_last_in_same_position() {
    let mut doc = document();
    let root = doc.root();
    let one = append(&mut doc, root, &s("one"));
    append(&mut doc, root, &s("two"));
    let two = doc.next_component(one).unwrap();

    doc.append(root, doc.container_of(two));
    assert_eq!(texts(&doc, &doc.collect(root, "s")), ["one", "two"]);
    assert_eq!(doc.lookup(root, "s"), Some(one));
}

#[test]
fn test_remove_all_child_instances() {
    let mut doc = document();
    let root = doc.root();
    append(&mut doc, root, &x(&x(&x(""))));
    append(&mut doc, root, &x(""));
    append(&mut doc, root, &x(""));

    let mut removed = 0;
    while let Some(c) = doc.lookup(root, "x") {
        doc.remove_component(c);
        removed += 1;
    }
    assert_eq!(removed, 3);
    assert!(doc.collect(root, "x").is_empty());
}

#[test]
fn test_remove_all_sub_instances() {
    let mut doc = document();
    let root = doc.root();
    append(&mut doc, root, &x(&x(&x(""))));
    append(&mut doc, root, &x(""));

    let mut removed = 0;
    while doc.lookup(root, "x").is_some() {
        let last = doc.last(root, "x").unwrap();
        doc.remove_component(last);
        removed += 1;
    }
    assert_eq!(removed, 4);
    assert!(doc.collect(root, "x").is_empty());
}

#[test]
fn test_append_last_component_that_is_not_last_node() {
    let mut doc = document();
    let root = doc.root();
    let cx = append(&mut doc, root, &div("x", &(s("one") + &s("two") + &div("foo", ""))));
    let xc = doc.container_of(cx);
    let two = doc.next_component(doc.get_component(cx, "s").unwrap()).unwrap();
    let two_c = doc.container_of(two);

    assert!(doc.append(xc, two_c));
    assert_eq!(doc.tree().last_child(doc.node_of(xc)), Some(doc.node_of(two_c)));
    assert_eq!(texts(&doc, &doc.collect(root, "s")), ["one", "two"]);
}

#[test]
fn test_component_table_accepts_any_name() {
    let mut doc = document();
    let root = doc.root();
    let cx = append(&mut doc, root, &x(""));
    let loaded = doc.load(&y("")).unwrap().unwrap();

    doc.set_component(cx, "z", Binding::Component(loaded));
    doc.set_component(cx, "container", Binding::Component(loaded));
    assert_eq!(doc.get_component(cx, "z"), Some(loaded));
    assert_eq!(doc.component_name(cx), "x");
    assert_eq!(doc.scope_of(doc.container_of(cx)), Some(root));

    doc.unset_component(cx, "z");
    assert_eq!(doc.get(cx, "z"), None);
}

#[test]
fn test_moving_out_updates_both_scopes() {
    let mut doc = document();
    let root = doc.root();
    let cx = append(&mut doc, root, &x(&y(&z(""))));
    let cy = doc.get_component(cx, "y").unwrap();

    assert!(doc.append(root, doc.container_of(cy)));
    assert_eq!(doc.lookup(root, "y"), Some(cy));
    assert!(doc.get_component(cy, "z").is_some());
    assert_eq!(doc.get(cy, "x"), None);
    assert_eq!(doc.get(cx, "y"), None);
}

#[test]
fn test_components_as_lists() {
    let mut doc = document();
    let root = doc.root();
    for t in ["one", "two", "three"] {
        append(&mut doc, root, &s(t));
    }
    let one = doc.lookup(root, "s").unwrap();
    let two = doc.next_component(one).unwrap();
    let three = doc.next_component(two).unwrap();

    assert_eq!(texts(&doc, &[one, two, three]), ["one", "two", "three"]);
    assert_eq!(doc.next_component(three), None);
    assert_eq!(doc.prev_component(three), Some(two));
    assert_eq!(doc.prev_component(one), None);
}

#[test]
fn test_lists_after_nested_append() {
    let mut doc = document();
    let root = doc.root();
    append(&mut doc, root, &s("one"));
    let cx = append(&mut doc, root, &x(""));
    let xc = doc.container_of(cx);
    append(&mut doc, xc, &s("two"));
    append(&mut doc, root, &s("three"));

    assert_eq!(texts(&doc, &doc.collect(root, "s")), ["one", "two", "three"]);
}

/// Records the outcome of each run into a shared log
struct Probe {
    log: Rc<RefCell<Vec<(String, bool)>>>,
}

impl Behavior for Probe {
    fn run(&mut self, cx: &mut RunContext<'_>) {
        let (component, container) = (cx.component(), cx.container());
        let name = cx.document().component_name(component).to_string();
        let passed = match name.as_str() {
            "collection" => cx.document().collect(container, "item").len() == 2,
            _ => cx.get("collection")
                .and_then(Binding::component)
                .map(|c| {
                    let doc = cx.document();
                    doc.collect(doc.container_of(c), "item").len() == 2
                })
                .unwrap_or(false),
        };
        self.log.borrow_mut().push((name, passed));
    }
}

#[test]
fn test_whole_tree_accessible_on_run() {
    init_tracing();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = Registry::new();
    for name in ["collection", "item"] {
        let log = Rc::clone(&log);
        registry.bind_with(name, move |_, _| Box::new(Probe { log: Rc::clone(&log) }));
    }

    Document::parse(registry, &div("collection", &(div("item", "") + &div("item", "")))).unwrap();

    let log = log.borrow();
    assert_eq!(log.len(), 3);
    assert!(log.iter().all(|(_, passed)| *passed));
}

struct Counter {
    runs: Rc<RefCell<Vec<ContainerId>>>,
}

impl Behavior for Counter {
    fn run(&mut self, cx: &mut RunContext<'_>) {
        self.runs.borrow_mut().push(cx.container());
    }
}

#[test]
fn test_every_component_runs_once() {
    init_tracing();
    let runs = Rc::new(RefCell::new(Vec::new()));
    let mut registry = Registry::new();
    let shared = Rc::clone(&runs);
    registry.bind_with("a", move |_, _| Box::new(Counter { runs: Rc::clone(&shared) }));

    let mut doc = Document::new(registry);
    let root = doc.root();
    let first = doc.append_markup(root, &div("a", "")).unwrap().unwrap();
    doc.append_markup(root, &div("a", "")).unwrap();
    doc.append_markup(doc.container_of(first), &div("a", "")).unwrap();

    let mut runs = runs.borrow().clone();
    assert_eq!(runs.len(), 3);
    runs.sort();
    runs.dedup();
    assert_eq!(runs.len(), 3);
}

#[test]
fn test_insert_moves_component() {
    let mut doc = document();
    let root = doc.root();
    let cx = append(&mut doc, root, &x(""));
    let cy = append(&mut doc, root, &y(""));

    assert!(doc.insert(doc.container_of(cx), doc.container_of(cy), None));
    assert_eq!(doc.get_component(cx, "y"), Some(cy));
    assert_eq!(doc.get_component(cy, "x"), Some(cx));
    assert_eq!(doc.lookup(root, "y"), None);
}

#[test]
fn test_markup_returns_first_root_component() {
    let mut doc = document();
    let root = doc.root();
    let cx = append(&mut doc, root, &x(&y("...")));
    let cy = doc.get_component(cx, "y").unwrap();
    assert_eq!(doc.component_name(cx), "x");
    assert_eq!(doc.get_component(cy, "x"), Some(cx));
}

#[test]
fn test_replace_content_with_text() {
    let mut doc = document();
    let root = doc.root();
    append(&mut doc, root, &x(""));

    let node = doc.update(root, Update::Text("abc".into())).unwrap().unwrap();
    assert_eq!(doc.tree().text_content(node), "abc");
    assert_eq!(doc.lookup(root, "x"), None);
    assert_eq!(doc.inner_html(root), "abc");
}

#[test]
fn test_patch_named_elements() {
    let mut doc = document();
    let root = doc.root();
    let cx = append(
        &mut doc,
        root,
        &x(r#"<span class="a"><span class="b">One</span><span class="c">Two</span></span>"#),
    );
    let xc = doc.container_of(cx);
    doc.update(xc, Update::Patch(vec![("b".into(), "One!".into()), ("c".into(), "Two!".into())])).unwrap();

    let b = doc.binding(xc, "b").and_then(Binding::node).unwrap();
    let c = doc.binding(xc, "c").and_then(Binding::node).unwrap();
    assert_eq!(doc.tree().text_content(b), "One!");
    assert_eq!(doc.tree().text_content(c), "Two!");
}

#[test]
fn test_flags_are_prepended() {
    let mut doc = document();
    let root = doc.root();
    let xc = append_container(&mut doc, root, &x(""));

    doc.apply(xc, "a");
    doc.apply(xc, "b");
    assert!(!doc.apply(xc, "b"));
    doc.apply(xc, "c");
    assert!(doc.clear(xc, "c"));
    assert!(!doc.clear(xc, "c"));

    assert_eq!(doc.tree().get_attr(doc.node_of(xc), "class"), Some("b a x"));
    assert!(doc.has_name(xc, "a") && doc.has_name(xc, "b") && !doc.has_name(xc, "c"));
}

#[test]
fn test_select_one_at_a_time() {
    let mut doc = document();
    let root = doc.root();
    let xc = append_container(&mut doc, root, &x(""));
    let yc = append_container(&mut doc, xc, &y(""));
    let zc = append_container(&mut doc, xc, &z(""));

    doc.select(root, Some(yc));
    doc.select(root, Some(zc));
    assert_eq!(doc.selected(root), Some(zc));
    assert!(doc.has_name(zc, "selected"));
    assert!(!doc.has_name(yc, "selected"));

    doc.select(root, None);
    assert_eq!(doc.selected(root), None);
    assert!(!doc.has_name(zc, "selected"));
}

#[test]
fn test_each_survives_removal() {
    let mut doc = document();
    let root = doc.root();
    for t in ["one", "two", "three"] {
        append(&mut doc, root, &s(t));
    }

    let mut visited = 0;
    doc.each_named(root, "s", |doc, c| {
        doc.remove(c);
        visited += 1;
        ControlFlow::<()>::Continue(())
    });
    assert_eq!(visited, 3);
    assert!(doc.collect(root, "s").is_empty());
}

#[test]
fn test_each_stops_on_break() {
    let mut doc = document();
    let root = doc.root();
    for t in ["one", "two", "three"] {
        append(&mut doc, root, &s(t));
    }
    let found = doc.each_named(root, "s", |doc, c| {
        if doc.text(c) == "two" {
            ControlFlow::Break(c)
        } else {
            ControlFlow::Continue(())
        }
    });
    assert_eq!(found.map(|c| doc.text(c)), Some("two".to_string()));
}

#[test]
fn test_shallow_clone() {
    let mut doc = document();
    let root = doc.root();
    let xc = append_container(&mut doc, root, &x(&y("")));
    let zc = append_container(&mut doc, root, &z(""));

    let copy = doc.clone_container(xc, false).unwrap().unwrap();
    assert!(doc.append(zc, copy));
    assert_eq!(doc.collect(root, "x").len(), 2);
    assert_eq!(doc.collect(root, "y").len(), 1);
}

#[test]
fn test_deep_clone() {
    let mut doc = document();
    let root = doc.root();
    let cx = append(&mut doc, root, &x(&y(&s("Yip"))));
    let cz = append(&mut doc, root, &z(""));

    let copy = doc.clone_container(doc.container_of(cx), true).unwrap().unwrap();
    assert!(doc.append(doc.container_of(cz), copy));

    let x2 = doc.get_component(cz, "x").unwrap();
    assert_ne!(x2, cx);
    let s2 = doc.get_component(doc.get_component(x2, "y").unwrap(), "s").unwrap();
    assert_eq!(text(&doc, s2), "Yip");
    assert_eq!(doc.collect(root, "s").len(), 2);
}

#[test]
fn test_later_move_supersedes_fade_removal() {
    let mut doc = document();
    let root = doc.root();
    let sc = append_container(&mut doc, root, &s("one"));
    let xc = append_container(&mut doc, root, &x(""));

    let handle = doc.remove_with_fade(sc, Duration::from_millis(100)).unwrap();
    assert!(doc.is_pending(handle));
    doc.advance(Duration::from_millis(50));

    assert!(doc.append(xc, sc));
    assert!(!doc.is_pending(handle));
    doc.finish_effects();

    assert!(doc.is_attached(sc));
    assert_eq!(doc.scope_of(sc), Some(xc));
}

#[test]
fn test_insert_with_fade_appears() {
    let mut doc = document();
    let root = doc.root();
    let loaded = doc.load(&s("new")).unwrap().unwrap();
    let sc = doc.container_of(loaded);

    assert!(doc.insert_with_fade(root, sc, None, Duration::from_millis(32)));
    assert_eq!(doc.tree().style_property(doc.node_of(sc), "opacity").as_deref(), Some("0"));
    assert_eq!(doc.finish_effects(), 1);
    assert_eq!(doc.tree().get_attr(doc.node_of(sc), "style"), None);
    assert_eq!(doc.lookup(root, "s"), Some(loaded));
}

/// Mirrors every binding change into a shared log
struct Mirror {
    log: Rc<RefCell<Vec<String>>>,
}

impl BindingPropagation for Mirror {
    fn set(&mut self, name: &str, _binding: Binding) {
        self.log.borrow_mut().push(format!("+{name}"));
    }

    fn unset(&mut self, name: &str) {
        self.log.borrow_mut().push(format!("-{name}"));
    }
}

impl Behavior for Mirror {
    fn propagation(&mut self) -> Option<&mut dyn BindingPropagation> {
        Some(self)
    }
}

#[test]
fn test_propagation_capability() {
    init_tracing();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = Registry::new();
    registry.bind("y");
    let shared = Rc::clone(&log);
    registry.bind_with("x", move |_, _| Box::new(Mirror { log: Rc::clone(&shared) }));

    let mut doc = Document::new(registry);
    let root = doc.root();
    let cx = doc.append_markup(root, &x("")).unwrap().unwrap();
    let cy = doc.append_markup(doc.container_of(cx), &y("")).unwrap().unwrap();
    doc.remove_component(cy);

    assert_eq!(*log.borrow(), ["+y", "-y"]);
    assert_eq!(doc.get(cx, "y"), None);
}

/// Appends a child `s` when it runs, mirroring bindings like `Mirror`
struct Filler {
    log: Rc<RefCell<Vec<String>>>,
}

impl BindingPropagation for Filler {
    fn set(&mut self, name: &str, _binding: Binding) {
        self.log.borrow_mut().push(format!("+{name}"));
    }

    fn unset(&mut self, name: &str) {
        self.log.borrow_mut().push(format!("-{name}"));
    }
}

impl Behavior for Filler {
    fn run(&mut self, cx: &mut RunContext<'_>) {
        let container = cx.container();
        cx.document().append_markup(container, &s("filled")).unwrap();
    }

    fn propagation(&mut self) -> Option<&mut dyn BindingPropagation> {
        Some(self)
    }
}

#[test]
fn test_propagation_during_run() {
    init_tracing();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = Registry::new();
    registry.bind("s");
    let shared = Rc::clone(&log);
    registry.bind_with("x", move |_, _| Box::new(Filler { log: Rc::clone(&shared) }));

    let mut doc = Document::new(registry);
    let root = doc.root();
    let cx = doc.append_markup(root, &x("")).unwrap().unwrap();

    let filled = doc.get_component(cx, "s").unwrap();
    assert_eq!(text(&doc, filled), "filled");
    assert_eq!(*log.borrow(), ["+s"]);

    doc.remove_component(filled);
    assert_eq!(*log.borrow(), ["+s", "-s"]);
}
