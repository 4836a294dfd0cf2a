use routemap::template::{Modifier, Operator};
use routemap::{UriTemplate, Value};

fn single(v: &str) -> Value {
    Value::Single(v.to_owned())
}

fn list(v: &[&str]) -> Value {
    Value::List(v.iter().map(|s| s.to_string()).collect())
}

fn assert_captures(template: &str, target: &str, expected: &[(&str, Value)]) {
    let t = UriTemplate::compile(template).unwrap();
    let caps = t
        .match_target(target)
        .unwrap_or_else(|| panic!("{:?} should match {:?}", template, target));
    assert_eq!(caps.len(), expected.len(), "template = {:?}", template);
    for (name, value) in expected {
        assert_eq!(caps.get(name), Some(value), "template = {:?}", template);
    }
}

#[test]
fn template_non_matching() {
    let cases = [
        ("/foo/{var}", "/bar/12"),
        ("/foo/{foo}/bar/{bar}", "/foo/12/13"),
        ("/hello/{hello}", "/hello/Hello%20World!"),
        ("{/var}", "/bar/12"),
        ("/{var}", "/value/"),
    ];
    for &(template, target) in cases.iter() {
        let t = UriTemplate::compile(template).unwrap();
        assert!(t.match_target(target).is_none(), "{:?} ~ {:?}", template, target);
        assert!(!t.is_match(target));
    }
}

#[test]
fn template_simple_strings() {
    assert_captures("/foo", "/foo", &[]);
    assert_captures("/{var}", "/value", &[("var", single("value"))]);
    assert_captures("/{hello}", "/Hello%20World%21", &[("hello", single("Hello World!"))]);
    assert_captures(
        "/{x,hello,y}",
        "/1024,Hello%20World%21,768",
        &[
            ("x", single("1024")),
            ("hello", single("Hello World!")),
            ("y", single("768")),
        ],
    );
}

#[test]
fn template_reserved_strings() {
    assert_captures("/{+var}", "/value", &[("var", single("value"))]);
    assert_captures("/{+hello}", "/Hello%20World!", &[("hello", single("Hello World!"))]);
    assert_captures("{+path}/here", "/foo/bar/here", &[("path", single("/foo/bar"))]);
}

#[test]
fn template_label_with_dot_prefix() {
    assert_captures("/{.who}", "/.fred", &[("who", single("fred"))]);
    assert_captures(
        "/{.half,who}",
        "/.50%25.fred",
        &[("half", single("50%")), ("who", single("fred"))],
    );
    assert_captures("/X{.empty}", "/X.", &[("empty", single(""))]);
}

#[test]
fn template_path_segments() {
    assert_captures("{/who}", "/fred", &[("who", single("fred"))]);
    assert_captures(
        "{/half,who}",
        "/50%25/fred",
        &[("half", single("50%")), ("who", single("fred"))],
    );
    assert_captures(
        "{/var,empty}",
        "/value/",
        &[("var", single("value")), ("empty", single(""))],
    );
}

#[test]
fn template_explosion() {
    assert_captures("/{count*}", "/one,two,three", &[("count", list(&["one", "two", "three"]))]);
    assert_captures("{/count*}", "/one/two/three", &[("count", list(&["one", "two", "three"]))]);
    assert_captures("X{.list*}", "X.red.green.blue", &[("list", list(&["red", "green", "blue"]))]);
    assert_captures("/files{/path*}", "/files/a%2Fb/c", &[("path", list(&["a/b", "c"]))]);
}

#[test]
fn template_prefix_modifier() {
    let t = UriTemplate::compile("/{code:3}").unwrap();
    assert_eq!(t.match_target("/abc").unwrap().get_str("code"), Some("abc"));
    assert_eq!(t.match_target("/%41b").unwrap().get_str("code"), Some("Ab"));
    assert!(t.match_target("/abcd").is_none());
}

#[test]
fn template_malformed_targets() {
    let t = UriTemplate::compile("/{var}").unwrap();
    assert!(t.match_target("/%zz").is_none());
    assert!(t.match_target("/%4").is_none());
    assert!(t.match_target("/%").is_none());
    assert!(t.match_target("/%FF").is_none());
    assert!(t.match_target("").is_none());
    assert_eq!(t.match_target("/%E2%82%AC").unwrap().get_str("var"), Some("\u{20ac}"));
}

#[test]
fn template_idempotence() {
    let a = UriTemplate::compile("/cats/{id}/{.ext}").unwrap();
    let b = UriTemplate::compile("/cats/{id}/{.ext}").unwrap();
    let target = "/cats/12/.json";
    assert_eq!(a.match_target(target), b.match_target(target));
    assert_eq!(a.match_target(target), a.match_target(target));
    assert_eq!(a.match_target(target).unwrap().get_str("ext"), Some("json"));
}

#[test]
fn template_variables() {
    let t: UriTemplate = "/a/{x,y*}{/z:4}".parse().unwrap();
    let vars: Vec<_> = t
        .variables()
        .map(|v| (v.name().to_owned(), v.operator(), v.modifier()))
        .collect();
    assert_eq!(
        vars,
        vec![
            ("x".to_owned(), Operator::Simple, Modifier::None),
            ("y".to_owned(), Operator::Simple, Modifier::Explode),
            ("z".to_owned(), Operator::PathSegment, Modifier::Prefix(4)),
        ]
    );
    assert_eq!(t.as_str(), "/a/{x,y*}{/z:4}");
    assert_eq!(t.to_string(), "/a/{x,y*}{/z:4}");
}

#[test]
fn template_syntax_errors() {
    let cases: &[(&str, usize)] = &[
        ("/foo/{", 5),
        ("/foo/}", 5),
        ("/foo/{}", 5),
        ("/{a{b}}", 1),
        ("/{a,}", 1),
        ("/{a,a}", 1),
        ("/{a}/{a}", 5),
        ("/{;a}", 1),
        ("/{?a}", 1),
        ("/{&a}", 1),
        ("/{#a}", 1),
        ("/{=a}", 1),
        ("/{+}", 1),
        ("/{a-b}", 1),
        ("/{a:0}", 1),
        ("/{a:10000}", 1),
        ("/{a:3*}", 1),
    ];
    for &(template, position) in cases {
        let err = UriTemplate::compile(template).unwrap_err();
        assert_eq!(err.position(), position, "template = {:?}: {}", template, err);
        assert_eq!(err.template(), template);
    }
}
