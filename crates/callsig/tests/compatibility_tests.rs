//! Prototype/candidate compatibility matrix.
//!
//! Each case checks one substitutability decision and carries a reason
//! string that ends up in the assertion message together with both rendered
//! signatures.

use callsig::{
    ClassGraph, NoopResolver, ParameterInfo, ReturnInfo, Signature, Type, TypeResolver,
};

/// Opt-in trace output for debugging a failing case: RUST_LOG=callsig=trace.
fn trace_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ty(name: &str) -> Option<Type> {
    Some(Type::named(name))
}

fn union(names: &[&str]) -> Option<Type> {
    Some(Type::union(names.iter().map(|n| Type::named(*n)).collect()))
}

fn intersection(names: &[&str]) -> Option<Type> {
    Some(Type::intersection(
        names.iter().map(|n| Type::named(*n)).collect(),
    ))
}

/// `(Interface1&Interface2)|string` - a union with an intersection member.
fn dnf() -> Option<Type> {
    Some(Type::union(vec![
        Type::intersection(vec![Type::named("Interface1"), Type::named("Interface2")]),
        Type::named("string"),
    ]))
}

/// Zero-parameter signature with the given return type.
fn returns(ty: Option<Type>) -> Signature {
    Signature::new(ReturnInfo::new(ty, false), vec![]).unwrap()
}

/// Void-returning signature over the given parameters.
fn takes(parameters: Vec<ParameterInfo>) -> Signature {
    Signature::new(ReturnInfo::new(Some(Type::named("void")), false), parameters).unwrap()
}

/// Void-returning signature with one required by-value parameter.
fn takes_one(ty: Option<Type>) -> Signature {
    takes(vec![ParameterInfo::required("a", ty)])
}

fn check_with<R: TypeResolver>(
    resolver: &R,
    prototype: &Signature,
    candidate: &Signature,
    expected: bool,
    reason: &str,
) {
    trace_init();
    assert_eq!(
        prototype.is_satisfied_by(candidate, resolver),
        expected,
        "{reason} ({prototype}, {candidate})"
    );
}

fn check(prototype: &Signature, candidate: &Signature, expected: bool, reason: &str) {
    check_with(&NoopResolver, prototype, candidate, expected, reason);
}

#[test]
fn test_return_covariance() {
    let cases: &[(Option<Type>, Option<Type>, bool, &str)] = &[
        (
            ty("void"),
            None,
            true,
            "given returns anything or nothing, which is allowed by a void type",
        ),
        (ty("void"), ty("void"), true, "same type"),
        (
            None,
            ty("void"),
            true,
            "unspecified type allows not returning anything",
        ),
        (
            ty("int"),
            None,
            false,
            "given function might return nothing, which is not allowed by an int type",
        ),
        (
            ty("mixed"),
            None,
            false,
            "given function might return nothing, which is not allowed by a mixed type",
        ),
        (
            union(&["int", "string"]),
            ty("int"),
            true,
            "given function returns a type which is covariant with required",
        ),
        (
            ty("int"),
            union(&["int", "string"]),
            false,
            "given function returns a type which is not covariant with required",
        ),
        (ty("float"), ty("int"), true, "int is covariant with float"),
        (
            ty("Interface1"),
            intersection(&["Interface1", "Interface2"]),
            true,
            "covariant intersection type",
        ),
        (
            intersection(&["Interface1", "Interface2"]),
            ty("Interface1"),
            false,
            "given type not covariant with required intersection",
        ),
        (
            dnf(),
            ty("Interface1"),
            false,
            "given type not covariant with any part of required union",
        ),
        (
            dnf(),
            intersection(&["Interface1", "Interface2"]),
            true,
            "given type covariant with at least 1 part of required union",
        ),
        (ty("mixed"), ty("int"), true, "int is covariant with mixed"),
        (
            ty("mixed"),
            union(&["int", "string"]),
            true,
            "int|string is covariant with mixed",
        ),
        (
            ty("mixed"),
            intersection(&["Interface1", "Interface2"]),
            true,
            "intersection is covariant with mixed",
        ),
        (
            ty("mixed"),
            ty("void"),
            false,
            "void is not covariant with mixed",
        ),
    ];

    for (required, given, expected, reason) in cases {
        check(
            &returns(required.clone()),
            &returns(given.clone()),
            *expected,
            reason,
        );
    }
}

#[test]
fn test_param_contravariance() {
    let cases: &[(Option<Type>, Option<Type>, bool, &str)] = &[
        (
            ty("string"),
            None,
            true,
            "given function accepts more types than required",
        ),
        (
            None,
            ty("string"),
            false,
            "given function must accept at least the types required (implicit mixed)",
        ),
        (ty("int"), ty("int"), true, "same type"),
        (
            ty("int"),
            ty("string"),
            false,
            "given function's accepted types are not covariant with required",
        ),
        (
            ty("int"),
            union(&["int", "string"]),
            true,
            "given function accepts a union which is covariant with required",
        ),
        (
            union(&["int", "string"]),
            ty("int"),
            false,
            "given function's union is not contravariant with required",
        ),
        (
            intersection(&["Interface1", "Interface2"]),
            ty("Interface1"),
            true,
            "parameter is contravariant with given intersection",
        ),
        (
            intersection(&["Interface1", "Interface2"]),
            intersection(&["Interface1", "Interface2"]),
            true,
            "same type",
        ),
        (
            ty("Interface1"),
            intersection(&["Interface1", "Interface2"]),
            false,
            "intersection given is not contravariant with required",
        ),
        (
            dnf(),
            intersection(&["Interface1", "Interface2"]),
            false,
            "given type must accept string",
        ),
        (
            intersection(&["Interface1", "Interface2"]),
            dnf(),
            true,
            "given type accepts string, which is not required by the signature",
        ),
        (ty("int"), ty("float"), true, "float is contravariant with int"),
        (
            ty("iterable"),
            ty("array"),
            false,
            "given function must accept any type of iterable",
        ),
        (
            union(&["int", "null"]),
            ty("int"),
            false,
            "given function does not accept null",
        ),
        (
            ty("int"),
            union(&["int", "null"]),
            true,
            "given function accepts null, which is not required by the signature",
        ),
        (ty("int"), ty("mixed"), true, "mixed is contravariant with int"),
        (
            union(&["int", "string"]),
            ty("mixed"),
            true,
            "mixed is contravariant with int|string",
        ),
        (
            intersection(&["Interface1", "Interface2"]),
            ty("mixed"),
            true,
            "mixed is contravariant with intersection",
        ),
        (
            dnf(),
            ty("mixed"),
            true,
            "mixed is contravariant with DNF type",
        ),
        (
            ty("mixed"),
            None,
            true,
            "unspecified parameter type is equivalent to mixed",
        ),
    ];

    for (required, given, expected, reason) in cases {
        check(
            &takes_one(required.clone()),
            &takes_one(given.clone()),
            *expected,
            reason,
        );
    }
}

#[test]
fn test_parameter_arity() {
    check(
        &takes(vec![
            ParameterInfo::required("a", ty("int")),
            ParameterInfo::required("b", ty("int")),
        ]),
        &takes(vec![ParameterInfo::required("a", ty("int"))]),
        true,
        "given function accepts fewer parameters than required",
    );
    check(
        &takes(vec![ParameterInfo::required("a", ty("int"))]),
        &takes(vec![
            ParameterInfo::required("a", ty("int")),
            ParameterInfo::required("b", ty("int")),
        ]),
        false,
        "given function requires too many parameters",
    );
    check(
        &takes(vec![ParameterInfo::required("a", ty("int"))]),
        &takes(vec![
            ParameterInfo::required("a", ty("int")),
            ParameterInfo::optional("b", ty("int")),
        ]),
        true,
        "given function's extra parameters are optional",
    );
}

#[test]
fn test_optional_and_variadic_tails() {
    check(
        &takes(vec![ParameterInfo::optional("a", ty("int"))]),
        &takes(vec![ParameterInfo::required("a", ty("int"))]),
        false,
        "required parameter cannot satisfy optional",
    );
    check(
        &takes(vec![ParameterInfo::optional("a", ty("int"))]),
        &takes(vec![ParameterInfo::variadic("a", ty("int"))]),
        true,
        "variadic parameter can satisfy optional",
    );
    check(
        &takes(vec![ParameterInfo::variadic("a", ty("int"))]),
        &takes(vec![ParameterInfo::required("a", ty("int"))]),
        false,
        "required parameter cannot satisfy variadic",
    );
    check(
        &takes(vec![ParameterInfo::variadic("a", ty("int"))]),
        &takes(vec![ParameterInfo::optional("a", ty("int"))]),
        true,
        "optional parameter can satisfy variadic",
    );
    check(
        &takes(vec![ParameterInfo::required("a", ty("int"))]),
        &takes(vec![ParameterInfo::variadic("a", ty("int"))]),
        true,
        "variadic can satisfy required",
    );
    check(
        &takes(vec![ParameterInfo::required("a", ty("int"))]),
        &takes(vec![ParameterInfo::optional("a", ty("int"))]),
        true,
        "optional can satisfy required",
    );
}

#[test]
fn test_variadic_tail_constrains_extra_parameters() {
    let variadic_prototype = takes(vec![ParameterInfo::variadic("rest", ty("int"))]);

    check(
        &variadic_prototype,
        &takes(vec![
            ParameterInfo::optional("a", ty("int")),
            ParameterInfo::optional("b", ty("int")),
            ParameterInfo::optional("c", ty("int")),
        ]),
        true,
        "optional extras all fit the variadic tail",
    );
    check(
        &variadic_prototype,
        &takes(vec![
            ParameterInfo::optional("a", ty("int")),
            ParameterInfo::optional("b", ty("string")),
        ]),
        false,
        "extra parameter does not fit the variadic tail's type",
    );
    check(
        &variadic_prototype,
        &takes(vec![
            ParameterInfo::optional("a", ty("int")),
            ParameterInfo::optional("b", union(&["int", "string"])),
        ]),
        true,
        "extra parameter widening the variadic tail is allowed",
    );
    check(
        &takes(vec![ParameterInfo::required("a", ty("int"))]),
        &takes(vec![
            ParameterInfo::required("a", ty("int")),
            ParameterInfo::optional("b", ty("string")),
        ]),
        true,
        "without a variadic tail, extra optional parameters are unconstrained",
    );
}

#[test]
fn test_by_reference_flags_must_agree() {
    let by_ref_return = Signature::new(ReturnInfo::new(ty("int"), true), vec![]).unwrap();
    let by_val_return = Signature::new(ReturnInfo::new(ty("int"), false), vec![]).unwrap();
    check(
        &by_ref_return,
        &by_val_return,
        false,
        "return-by-reference must match",
    );
    check(
        &by_ref_return,
        &by_ref_return.clone(),
        true,
        "matching return-by-reference",
    );

    let by_ref_param = takes(vec![ParameterInfo::new("a", ty("int"), true, false, false)]);
    let by_val_param = takes_one(ty("int"));
    check(
        &by_ref_param,
        &by_val_param,
        false,
        "parameter-by-reference must match",
    );
    check(
        &by_val_param,
        &by_ref_param,
        false,
        "parameter-by-reference must match in either direction",
    );
}

#[test]
fn test_class_hierarchy_variance() {
    let mut graph = ClassGraph::new();
    graph.define("Animal", &[]);
    graph.define("Dog", &["Animal"]);
    graph.mark_traversable("Traversable");
    graph.define("ArrayIterator", &["Traversable"]);
    graph.mark_invokable("Closure");

    check_with(
        &graph,
        &returns(ty("Animal")),
        &returns(ty("Dog")),
        true,
        "subclass return is covariant",
    );
    check_with(
        &graph,
        &returns(ty("Dog")),
        &returns(ty("Animal")),
        false,
        "superclass return is not covariant",
    );
    check_with(
        &graph,
        &takes_one(ty("Dog")),
        &takes_one(ty("Animal")),
        true,
        "superclass parameter is contravariant",
    );
    check_with(
        &graph,
        &takes_one(ty("Animal")),
        &takes_one(ty("Dog")),
        false,
        "subclass parameter is not contravariant",
    );
    check_with(
        &graph,
        &returns(ty("iterable")),
        &returns(ty("ArrayIterator")),
        true,
        "traversable implementation is covariant with iterable",
    );
    check_with(
        &graph,
        &returns(ty("callable")),
        &returns(ty("Closure")),
        true,
        "closure class is covariant with callable",
    );
    check_with(
        &graph,
        &returns(ty("object")),
        &returns(ty("Dog")),
        true,
        "class is covariant with object",
    );
}

#[test]
fn test_matching_is_deterministic() {
    let prototype = takes(vec![
        ParameterInfo::required("a", union(&["int", "string"])),
        ParameterInfo::variadic("rest", ty("int")),
    ]);
    let candidate = takes(vec![
        ParameterInfo::required("a", ty("mixed")),
        ParameterInfo::variadic("rest", union(&["int", "float"])),
    ]);

    let first = prototype.is_satisfied_by(&candidate, &NoopResolver);
    for _ in 0..3 {
        assert_eq!(
            prototype.is_satisfied_by(&candidate, &NoopResolver),
            first
        );
    }
    assert_eq!(prototype.to_string(), prototype.to_string());
}
