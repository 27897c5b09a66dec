//! Integration tests for the locate → extract → emit pipeline.
//!
//! Every test builds a small corpus tree in a temporary directory and pulls
//! it through the public `Corpus` interface.

use std::fs;
use std::path::Path;

use palimpsest_core::Error;
use palimpsest_etl::{
    write_corpus, AnimacyCorpus, ClmetCorpus, ClmetTaggedCorpus, ContentiousCorpus, Corpus,
    HansardCorpus, LampeterCorpus, NewsbooksCorpus, OdeuropaCorpus, OldBaileyCorpus,
};
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn clmet_file(id: &str, body: &str) -> String {
    format!(
        "<id>{id}</id><period>1850-1920</period><quartcent>1850-1874</quartcent>\
         <decade>1850</decade><year>1859</year><genre>Narrative fiction</genre>\
         <subgenre>Novel</subgenre><title>Title of {id}</title><author>Author</author>\
         <text><p>{body}</p></text>"
    )
}

const SPEECH_HEADER: &str = "id,speech,display_as,party,constituency,mnis_id,date,time,\
colnum,speech_class,major_heading,minor_heading,oral_heading,year,hansard_membership_id,\
speakerid,person_id,speakername,url";

/// Malformed chunks are dropped and unknown tags map to -1, with one
/// warning of each kind per file.
#[test]
fn test_tagged_clmet_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("clmet/corpus/txt/pos");
    write(
        &dir.join("CLMET3_1_3_1.txt"),
        &clmet_file("CLMET3_1_3_1", "The_DT odd_QQ engine_NN broken lone_ roared_VBD odd_QQ"),
    );

    let corpus = ClmetTaggedCorpus::pos(temp_dir.path().to_path_buf());
    let mut emitter = corpus.emit().expect("Failed to start extraction");
    let (key, record) = emitter.next().unwrap().unwrap();

    assert_eq!(key.as_str(), "CLMET3_1_3_1");
    assert_eq!(record.tokens, vec!["The", "odd", "engine", "lone", "roared", "odd"]);
    assert_eq!(record.tokens.len(), record.pos_tags.len());
    assert_eq!(record.pos_tags, vec![2, -1, 10, -1, 27, -1]);
    assert!(emitter.next().is_none());
    assert_eq!(emitter.stats().warnings, 2);
}

/// Re-running over an unchanged tree yields the same keys in the same
/// order, sorted by file name.
#[test]
fn test_emission_order_is_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("clmet/corpus/txt/plain");
    for id in ["c", "a", "b"] {
        write(&dir.join(format!("{id}.txt")), &clmet_file(id, "Some text."));
    }

    let corpus = ClmetCorpus::new(temp_dir.path().to_path_buf());
    let keys = |corpus: &ClmetCorpus| -> Vec<String> {
        corpus
            .emit()
            .unwrap()
            .map(|item| item.unwrap().0.to_string())
            .collect()
    };

    let first = keys(&corpus);
    assert_eq!(first, vec!["a", "b", "c"]);
    assert_eq!(first, keys(&corpus));
}

/// A file with a missing header element is skipped; the rest still emit.
#[test]
fn test_broken_unit_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("clmet/corpus/txt/plain");
    write(&dir.join("a.txt"), &clmet_file("a", "Fine."));
    write(&dir.join("b.txt"), "<id>b</id><text><p>No header.</p></text>");
    write(&dir.join("c.txt"), &clmet_file("c", "Also fine."));

    let corpus = ClmetCorpus::new(temp_dir.path().to_path_buf());
    let mut emitter = corpus.emit().unwrap();
    let keys: Vec<String> = emitter
        .by_ref()
        .map(|item| item.unwrap().0.to_string())
        .collect();

    assert_eq!(keys, vec!["a", "c"]);
    assert_eq!(emitter.stats().skipped, 1);
}

/// A missing corpus directory aborts before anything is emitted.
#[test]
fn test_missing_directory_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let corpus = NewsbooksCorpus::new(temp_dir.path().to_path_buf());

    match corpus.emit() {
        Err(Error::NotFound { path, .. }) => assert!(path.ends_with("1654_newsbooks")),
        other => panic!("expected NotFound, got {other:?}"),
    };
}

/// Newsbooks are decoded as Latin-1 and tagged with their collection.
#[test]
fn test_newsbooks_collections() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("1654_newsbooks")).unwrap();
    fs::create_dir_all(root.join("mercurius_fumigosus")).unwrap();

    let mut issue = b"<newsbookDoc id=\"MF1\"><title>Mercurius</title><p>Caf".to_vec();
    issue.push(0xe9);
    issue.extend_from_slice(b"</p></newsbookDoc>");
    fs::write(root.join("mercurius_fumigosus/MF1.xml"), issue).unwrap();
    write(
        &root.join("1654_newsbooks/N1.xml"),
        "<newsbookDoc id=\"N1\"><title>Perfect Diurnall</title><p>News.</p></newsbookDoc>",
    );

    let corpus = NewsbooksCorpus::new(root.to_path_buf());
    let records: Vec<_> = corpus.emit().unwrap().map(|item| item.unwrap().1).collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].collection, "1654_newsbooks");
    assert_eq!(records[1].id, "MF1");
    assert_eq!(records[1].text, "Caf\u{e9}");
}

/// An unknown genre prefix skips that tract only.
#[test]
fn test_lampeter_category_failure_is_local() {
    let temp_dir = TempDir::new().unwrap();
    let tei = |title: &str| {
        format!(
            "<TEI><teiHeader><fileDesc><titleStmt><title>{title}</title></titleStmt>\
             </fileDesc></teiHeader><text><body><p>Body of {title}</p></body></text></TEI>"
        )
    };
    write(
        &temp_dir.path().join("3193.xml"),
        &format!(
            "<?xml version=\"1.0\"?>\n<teiCorpus>{}{}{}</teiCorpus>",
            tei("LawA1660: Of Laws"),
            tei("XyzA1661: Unknown"),
            tei("SciB1680: Of Comets")
        ),
    );

    let corpus = LampeterCorpus::new(temp_dir.path().to_path_buf());
    let mut emitter = corpus.emit().unwrap();
    let records: Vec<_> = emitter.by_ref().map(|item| item.unwrap().1).collect();

    let genres: Vec<&str> = records.iter().map(|tract| tract.genre.as_str()).collect();
    assert_eq!(genres, vec!["Law", "Science"]);
    assert_eq!(emitter.stats().skipped, 1);
}

/// A corpus file that is not well-formed aborts the run.
#[test]
fn test_lampeter_unparseable_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    write(&temp_dir.path().join("3193.xml"), "<teiCorpus><TEI>");

    let corpus = LampeterCorpus::new(temp_dir.path().to_path_buf());
    assert!(matches!(corpus.emit(), Err(Error::Markup { .. })));
}

/// Both Old Bailey collections are read, Ordinary's Accounts first.
#[test]
fn test_old_bailey_collections() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        &root.join("ordinarysAccounts/OA1.xml"),
        "<TEI.2><text><body><div0 id=\"OA1\"><interp type=\"date\" value=\"16760517\"/>\
         <p>Account of <persName>Mary Jones</persName></p></div0></body></text></TEI.2>",
    );
    write(
        &root.join("sessionsPapers/OBP1.xml"),
        "<TEI.2><text><body><div0 id=\"OBP1\"><interp type=\"date\" value=\"16740429\"/>\
         <div1><p>Tried at <placeName>Newgate</placeName></p></div1></div0></body></text></TEI.2>",
    );

    let corpus = OldBaileyCorpus::new(root.to_path_buf());
    let records: Vec<_> = corpus.emit().unwrap().map(|item| item.unwrap().1).collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].kind.code(), "OA");
    assert_eq!(records[0].persons, vec!["Mary Jones"]);
    assert_eq!(records[1].kind.code(), "OBP");
    assert_eq!(records[1].places, vec!["Newgate"]);
}

/// Offsets point at the marker; a sentence without one keeps (-1, -1).
#[test]
fn test_animacy_table() {
    let temp_dir = TempDir::new().unwrap();
    write(
        &temp_dir
            .path()
            .join("LwM-nlp-animacy-annotations-machines19thC.tsv"),
        "SentenceId\tSentence\tSentenceCtxt\tTargetExpression\tanimacy\thumanness\tDate\n\
         1\tThe ***engine*** roared\tctx\tengine\t1.0\t0.0\t1860\n\
         2\tNo marker\tctx\tengine\t0.0\t0.0\t1861\n\
         3\tBad ***score***\tctx\tscore\tn/a\t0.0\t1862\n",
    );

    let corpus = AnimacyCorpus::new(temp_dir.path().to_path_buf()).with_chunk_size(1);
    let mut emitter = corpus.emit().unwrap();
    let records: Vec<_> = emitter.by_ref().map(|item| item.unwrap().1).collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].sentence, "The engine roared");
    assert_eq!(records[0].offsets, [4, 10]);
    assert_eq!(records[1].offsets, [-1, -1]);
    let stats = emitter.stats();
    assert_eq!((stats.emitted, stats.skipped, stats.warnings), (2, 1, 1));
}

/// A speech whose join key has no postings row is still emitted.
#[test]
fn test_hansard_join() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        &root.join("hansard-speeches-v310.csv"),
        &format!(
            "{SPEECH_HEADER}\n\
             s1,\"Order, order.\",Speaker,,,172,2019-01-01,,,,,,,2019,,,,,\n\
             s2,Hear hear.,Member,,,999,2019-01-01,,,,,,,2019,,,,,\n"
        ),
    );
    write(
        &root.join("parliamentary_posts.json"),
        r#"[{"mnis_id": 172, "date": "2019-01-01 00:00:00",
             "parliamentary_posts": [{"parl_post_name": "Speaker of the House of Commons"}]}]"#,
    );

    let corpus = HansardCorpus::new(root.to_path_buf());
    let records: Vec<_> = corpus.emit().unwrap().map(|item| item.unwrap().1).collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].speech, "Order, order.");
    assert_eq!(
        records[0].parliamentary_posts,
        vec!["Speaker of the House of Commons"]
    );
    assert!(records[1].parliamentary_posts.is_empty());
    assert!(records[1].government_posts.is_empty());
}

/// A speeches table without the required columns aborts the run.
#[test]
fn test_hansard_missing_columns_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(&root.join("hansard-speeches-v310.csv"), "id,speech\ns1,Hello\n");
    write(&root.join("parliamentary_posts.json"), "[]");

    let corpus = HansardCorpus::new(root.to_path_buf());
    assert!(matches!(corpus.emit(), Err(Error::MissingColumns { .. })));
}

#[test]
fn test_contentious_extracts() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        &root.join("Extracts.csv"),
        "extract_id,text,target_compound_bolded\ne1,De tekst,<b>woord</b>\ne2,Meer,<b>x</b>\n",
    );
    write(
        &root.join("Annotations.csv"),
        "extract_id,anonymised_participant_id,response,suggestion\n\
         e2,p1,Niet omstreden,\ne1,p2,Weet ik niet,\n",
    );

    let corpus = ContentiousCorpus::new(root.to_path_buf());
    let records: Vec<_> = corpus.emit().unwrap().map(|item| item.unwrap().1).collect();

    assert_eq!(records[0].extract_id, "e1");
    assert_eq!(records[0].annotator_responses_english[0].response, "I don't know");
    assert_eq!(records[1].annotator_responses_dutch[0].response, "Niet omstreden");
}

#[test]
fn test_odeuropa_writes_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        &root.join("annotations.json"),
        r#"{
            "images": [{"id": 1, "file_name": "1.jpg", "width": 100, "height": 50}],
            "annotations": [
                {"id": 10, "image_id": 1, "category_id": 3, "bbox": [0, 0, 10, 10], "area": 100}
            ],
            "categories": [{"id": 3, "name": "pipe"}]
        }"#,
    );
    write(
        &root.join("metadata.csv"),
        "File Name,Image URL,Artist\n1.jpg,https://example.org/1.jpg,Jan Steen\n",
    );

    let corpus = OdeuropaCorpus::new(root.to_path_buf());
    let mut output = Vec::new();
    let stats = write_corpus(&corpus, &mut output).expect("Failed to write corpus");
    assert_eq!(stats.emitted, 1);
    assert_eq!(stats.warnings, 0);

    let line: serde_json::Value =
        serde_json::from_slice(output.split(|b| *b == b'\n').next().unwrap()).unwrap();
    assert_eq!(line["key"], "1");
    assert_eq!(line["record"]["annotations"][0]["category"], "pipe");
    assert_eq!(line["record"]["metadata"]["artist"], "Jan Steen");
    assert_eq!(line["record"]["image_url"], "https://example.org/1.jpg");
}
