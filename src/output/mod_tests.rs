use super::*;

#[test]
fn annotation_renders_the_workflow_command() {
    let annotation = Annotation {
        location: AnnotationLocation::new("Cargo.toml", 1, 1),
        message: "breaking change detected".to_string(),
    };
    assert_eq!(
        annotation.to_string(),
        "::error file=Cargo.toml,line=1,col=1::breaking change detected"
    );
}

#[test]
fn message_data_is_escaped() {
    let annotation = Annotation {
        location: AnnotationLocation::new("Cargo.toml", 3, 7),
        message: "50% done\r\nnext line".to_string(),
    };
    assert_eq!(
        annotation.to_string(),
        "::error file=Cargo.toml,line=3,col=7::50%25 done%0D%0Anext line"
    );
}

#[test]
fn file_property_escapes_separators() {
    let annotation = Annotation {
        location: AnnotationLocation::new("odd:name,with%chars.toml", 1, 1),
        message: "m".to_string(),
    };
    assert_eq!(
        annotation.to_string(),
        "::error file=odd%3Aname%2Cwith%25chars.toml,line=1,col=1::m"
    );
}

#[test]
fn escape_data_handles_each_character() {
    assert_eq!(escape_data("a%b"), "a%25b");
    assert_eq!(escape_data("a\rb"), "a%0Db");
    assert_eq!(escape_data("a\nb"), "a%0Ab");
    assert_eq!(escape_data("plain"), "plain");
}

#[test]
fn escape_property_extends_data_escaping() {
    assert_eq!(escape_property("a:b,c"), "a%3Ab%2Cc");
    assert_eq!(escape_property("a%:b"), "a%25%3Ab");
}
