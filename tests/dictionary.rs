use std::io::{Cursor, Write};

use balanced_dict::shell::{Command, Flow, Shell};
use balanced_dict::{loader, BulkOp, Dictionary, Error, OrderedSet, Strategy};

const STRATEGIES: [Strategy; 2] = [Strategy::Avl, Strategy::RedBlack];

fn word_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn three_ascending_words() {
    for strategy in STRATEGIES {
        let mut dictionary = Dictionary::new(strategy);
        for word in ["10", "20", "30"] {
            assert!(dictionary.insert(word.to_string()));
        }
        assert_eq!(dictionary.height(), 2);
        assert!(dictionary.search(&"20".to_string()));
        assert!(!dictionary.search(&"25".to_string()));
    }
}

#[test]
fn delete_root_of_three() {
    for strategy in STRATEGIES {
        let mut dictionary = Dictionary::new(strategy);
        dictionary.apply([20, 10, 30], BulkOp::Insert);
        assert!(dictionary.delete(&20));
        assert_eq!(dictionary.size(), 2);
        assert!(dictionary.search(&10));
        assert!(dictionary.search(&30));
        assert!(!dictionary.search(&20));
    }
}

#[test]
fn unknown_selector_is_rejected() {
    let err = Dictionary::<String>::from_selector("Splay").err().unwrap();
    assert!(matches!(err, Error::InvalidStrategy(_)));
    assert!(err.to_string().contains("Splay"));
}

#[test]
fn batch_file_insert_and_delete() {
    let inserts = word_file("apple\n  banana \n\napple\ncherry\n");
    let deletes = word_file("banana\ndurian\n");

    for strategy in STRATEGIES {
        let mut dictionary = Dictionary::new(strategy);
        let outcome = loader::apply_file(&mut dictionary, inserts.path(), BulkOp::Insert).unwrap();
        assert_eq!((outcome.succeeded, outcome.rejected), (3, 1));
        assert_eq!(dictionary.size(), 3);

        let outcome = loader::apply_file(&mut dictionary, deletes.path(), BulkOp::Delete).unwrap();
        assert_eq!((outcome.succeeded, outcome.rejected), (1, 1));
        assert!(!dictionary.search(&"banana".to_string()));
        assert!(dictionary.search(&"cherry".to_string()));
    }
}

#[test]
fn batch_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");
    let mut dictionary = Dictionary::new(Strategy::Avl);
    match loader::apply_file(&mut dictionary, &path, BulkOp::Insert) {
        Err(Error::Io { path: Some(reported), .. }) => assert_eq!(reported, path),
        other => panic!("expected an I/O error, got {:?}", other.map(|o| o.total())),
    }
    assert!(dictionary.is_empty());
}

#[test]
fn shell_session() {
    let words = word_file("kiwi\nlemon\nkiwi\n");
    let script = format!(
        "insert apple\n\
         insert apple\n\
         SEARCH apple\n\
         search pear\n\
         delete pear\n\
         batch-insert {}\n\
         insert\n\
         frobnicate\n\
         size\n\
         height\n\
         exit\n\
         insert never\n",
        words.path().display()
    );

    for strategy in STRATEGIES {
        let mut output = Vec::new();
        let mut shell = Shell::new(Dictionary::new(strategy), Cursor::new(script.clone()), &mut output);
        shell.run().unwrap();
        let dictionary = shell.into_dictionary();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("inserted successfully."));
        assert!(output.contains("It may already exist."));
        assert!(output.contains("found in dictionary."));
        assert!(output.contains("not found in dictionary."));
        assert!(output.contains("Please specify a word to insert."));
        assert!(output.contains("Unknown command."));
        assert!(output.contains("Exiting..."));

        assert_eq!(dictionary.size(), 3);
        assert!(dictionary.search(&"lemon".to_string()));
        assert!(!dictionary.search(&"never".to_string()));
    }
}

#[test]
fn shell_stops_at_end_of_input() {
    let mut output = Vec::new();
    let mut shell = Shell::new(
        Dictionary::new(Strategy::RedBlack),
        Cursor::new("insert plum\n"),
        &mut output,
    );
    shell.run().unwrap();
    assert!(shell.dictionary().search(&"plum".to_string()));
}

#[test]
fn shell_reports_missing_batch_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");

    let mut output = Vec::new();
    let mut shell = Shell::new(Dictionary::new(Strategy::Avl), Cursor::new(""), &mut output);
    let flow = shell.execute(Command::BatchDelete(missing)).unwrap();
    assert_eq!(flow, Flow::Continue);
    assert_eq!(shell.execute(Command::Exit).unwrap(), Flow::Exit);
    drop(shell);

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Error: cannot read word list"));
}
