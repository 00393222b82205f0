//! Scope trees for representative sources, as printed by `scopefmt scopes`.

use scopefmt::formats::scope_outline;
use scopefmt::scoping::ScopeKind;
use scopefmt::testing::{analyze, scope_kinds};

fn outline(source: &str) -> String {
    scope_outline(&analyze(source))
}

#[test]
fn test_view_controller() {
    let source = "final class ViewController: UIViewController {
    private var items: [String] = []

    var count: Int {
        items.count
    }

    override func viewDidLoad() {
        super.viewDidLoad()
        items.forEach { item in
            print(item)
        }
    }
}
";
    insta::assert_snapshot!(outline(source), @r"
    TypeDeclaration 1-14 (3 statements)
      FunctionBody 4-6 (1 statement)
      FunctionBody 8-13 (2 statements)
        ClosureBody 10-12 (1 statement)
    ");
}

#[test]
fn test_protocol_and_accessors() {
    let source = "protocol Store: AnyObject {
    var value: Int { get set }
    subscript(key: String) -> Int { get }
}

struct Box {
    var stored = 0 {
        willSet { print(newValue) }
        didSet {
            notify()
        }
    }
}
";
    insta::assert_snapshot!(outline(source), @r"
    Protocol 1-4 (2 statements)
      AccessorBody 2-2 (1 statement)
      AccessorBody 3-3 (1 statement)
    TypeDeclaration 6-13 (1 statement)
      AccessorBody 7-12 (2 statements)
        FunctionBody 8-8 (1 statement)
        FunctionBody 9-11 (1 statement)
    ");
}

#[test]
fn test_switch_cases() {
    let source = "func describe(_ value: Int) -> String {
    switch value {
    case 0:
        return \"zero\"
    case let x where x < 0:
        if x < -10 {
            return \"very negative\"
        }
        return \"negative\"
    default:
        return \"positive\"
    }
}
";
    insta::assert_snapshot!(outline(source), @r"
    FunctionBody 1-13 (1 statement)
      SwitchBody 2-12 (0 statements)
        CaseBody 3-5 (1 statement)
        CaseBody 5-10 (2 statements)
          ConditionalBody 6-8 (1 statement)
        CaseBody 10-12 (1 statement)
    ");
}

#[test]
fn test_control_flow_and_closures() {
    let source = "func load() {
    guard let url = url else {
        return
    }
    do {
        let data = try fetch(url, completion: { result in
            handle(result)
        })
    } catch {
        log(error)
    }
}
";
    insta::assert_snapshot!(outline(source), @r"
    FunctionBody 1-12 (2 statements)
      ConditionalBody 2-4 (1 statement)
      ConditionalBody 5-9 (1 statement)
        ClosureBody 6-8 (1 statement)
      ConditionalBody 9-11 (1 statement)
    ");
}

#[test]
fn test_kinds_by_introducer() {
    let cases = [
        ("struct A {}", ScopeKind::TypeDeclaration),
        ("enum A {}", ScopeKind::TypeDeclaration),
        ("extension A {}", ScopeKind::TypeDeclaration),
        ("actor A {}", ScopeKind::TypeDeclaration),
        ("open class A {}", ScopeKind::TypeDeclaration),
        ("protocol A: class {}", ScopeKind::Protocol),
        ("override class func a() -> String? {}", ScopeKind::FunctionBody),
        ("mutating func a() {}", ScopeKind::FunctionBody),
        ("convenience init() {}", ScopeKind::FunctionBody),
        ("deinit {}", ScopeKind::FunctionBody),
        ("while true {}", ScopeKind::ConditionalBody),
        ("repeat {} while a", ScopeKind::ConditionalBody),
        ("defer {}", ScopeKind::ConditionalBody),
        ("switch a {}", ScopeKind::SwitchBody),
        ("let a = { }", ScopeKind::ClosureBody),
        ("#if DEBUG\n{}\n#endif", ScopeKind::Other),
    ];
    for (source, kind) in cases {
        assert_eq!(scope_kinds(source), vec![kind], "{source}");
    }
}
