use gazetteer_toponym_extractor::*;

fn main() {
    env_logger::init();

    let gazetteer = gazetteer!(
        ("new avadi road", [1]),
        ("avadi", [2, 3]),
        ("anna nagar", [4]),
        ("velachery", [5]),
        ("chennai", [6, 7, 8]),
    );
    let vocabulary: Vocabulary = vec!["stuck", "at", "need", "boats", "in", "and", "near"]
        .into_iter()
        .collect();
    let mut segmenter = KnownSegmentations::default();
    segmenter.add("chennaifloods", vec!["chennai", "floods"]);

    let environment = ExtractorBuilder::default()
        .gazetteer(gazetteer)
        .vocabulary(vocabulary)
        .abbreviations(AbbreviationTable::from_pairs(vec![("nagar", "ngr")]))
        .suffix_expansions(vec![("rd", "road")].into_iter().collect())
        .hashtag_segmenter(segmenter)
        .build()
        .unwrap();
    let mut extractor = Extractor::default();
    extractor.initialize(environment);

    let sentence = "#ChennaiFloods stuck at New Avadi Rd, need boats near Anna Ngr";
    let toponyms = extractor.extract(sentence).unwrap();
    for toponym in &toponyms {
        println!(
            "{:?} at {:?} -> {:?} {:?}",
            toponym.mention, toponym.range, toponym.matched_name, toponym.ids
        );
    }
    assert_eq!(
        toponyms,
        vec![
            Toponym {
                mention: "Chennai".to_string(),
                range: 1..8,
                matched_name: "chennai".to_string(),
                ids: vec![6, 7, 8].into_iter().collect(),
            },
            Toponym {
                mention: "New Avadi Rd".to_string(),
                range: 24..36,
                matched_name: "new avadi road".to_string(),
                ids: vec![1].into_iter().collect(),
            },
            Toponym {
                mention: "Anna Ngr".to_string(),
                range: 54..62,
                matched_name: "anna nagar".to_string(),
                ids: vec![4].into_iter().collect(),
            },
        ]
    );
}
