/////////////////////////////TESTS////////////////////////////////////////////////////
#[cfg(test)]
mod tests1 {
    use crate::Utils::task_parser::{
        Value, filter_comments, parse_document, parse_document_as, parse_key,
        parse_key_value_pair, parse_section, parse_title, parse_value, parse_value_list,
        template_of,
    };

    #[test]
    fn test_parse_title_and_key() {
        let (remaining, title) = parse_title("solver\n  precision: 6").unwrap();
        assert_eq!(title, "solver");
        assert_eq!(remaining, "precision: 6");

        let (remaining, key) = parse_key("x_min: -5").unwrap();
        assert_eq!(key, "x_min");
        assert_eq!(remaining, ": -5");
    }

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("6, next").unwrap(), (", next", Value::Integer(6)));
        assert_eq!(parse_value("-2.5").unwrap(), ("", Value::Float(-2.5)));
        assert_eq!(parse_value("true").unwrap(), ("", Value::Boolean(true)));
        assert_eq!(
            parse_value("debug\n").unwrap(),
            ("\n", Value::String("debug".to_string()))
        );
    }

    #[test]
    fn test_parse_value_list() {
        let (remaining, values) = parse_value_list("-10, 10 , 1e-3").unwrap();
        assert_eq!(
            values,
            vec![Value::Integer(-10), Value::Integer(10), Value::Float(1e-3)]
        );
        assert_eq!(remaining, "");
        let (_, empty) = parse_value_list("").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_parse_key_value_pair() {
        let (remaining, (key, values)) = parse_key_value_pair("samples : 200\nnext: 1").unwrap();
        assert_eq!(key, "samples");
        assert_eq!(values, vec![Value::Integer(200)]);
        assert_eq!(remaining, "next: 1");
    }

    #[test]
    fn test_parse_section_stops_at_next_title() {
        let input = "solver\n  precision: 6\n  loglevel: info\ngraph\n  samples: 50";
        let (remaining, (title, map)) = parse_section(input).unwrap();
        assert_eq!(title, "solver");
        assert_eq!(map.len(), 2);
        assert_eq!(map["loglevel"], vec![Value::String("info".to_string())]);
        assert_eq!(remaining, "graph\n  samples: 50");
    }

    #[test]
    fn test_parse_document() {
        let input = "solver precision: 3\ngraph\n x_min: -5\n x_max: 5";
        let (remaining, doc) = parse_document(input).unwrap();
        assert_eq!(remaining, "");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc["solver"]["precision"], Some(vec![Value::Integer(3)]));
        assert_eq!(doc["graph"]["x_max"], Some(vec![Value::Integer(5)]));
    }

    #[test]
    fn test_comments_are_skipped() {
        let input = "# settings\nsolver\n// precision below\n  precision: 2\n% end";
        assert_eq!(filter_comments(input), "solver\n  precision: 2");
        let doc = parse_document_as(input, None).unwrap();
        assert_eq!(doc["solver"]["precision"], Some(vec![Value::Integer(2)]));
    }

    #[test]
    fn test_template_fills_missing_keys() {
        const SOLVER: &[&str] = &["precision", "loglevel"];
        const EXPORT: &[&str] = &["directory"];
        let template = template_of(&[("solver", SOLVER), ("export", EXPORT)]);
        let doc = parse_document_as("solver\n precision: 5", Some(&template)).unwrap();
        assert_eq!(doc["solver"]["precision"], Some(vec![Value::Integer(5)]));
        assert_eq!(doc["solver"]["loglevel"], None);
        assert_eq!(doc["export"]["directory"], None);
    }

    #[test]
    fn test_malformed_document() {
        assert!(parse_document_as("solver\n precision 5", None).is_err());
        assert!(parse_document_as("", None).unwrap().is_empty());
    }
}
