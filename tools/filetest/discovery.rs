//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::testcase::FileTestCase;
use miri::utility::SaHashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

/// A `.mir` file: its name, its full text and the checks parsed from its header.
pub type TestFile = (String, &'static str, FileTestCase<'static>);

// keyed by the path relative to `tests/filetests/`, `""` is the root itself
type TestFiles = SaHashMap<String, Vec<TestFile>>;

static TEST_FILES: OnceLock<TestFiles> = OnceLock::new();

fn read_case(name: String, path: PathBuf) -> TestFile {
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("unable to read '{}': {e}", path.display()));

    // files live for the whole run, leaking them lets the checks borrow
    // straight out of the text
    let text: &'static str = Box::leak(text.into_boxed_str());
    let case = FileTestCase::from_raw(&name, text);

    (name, text, case)
}

fn discover() -> TestFiles {
    let mut found = TestFiles::default();
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/filetests");
    let mut pending = vec![(String::default(), root)];

    while let Some((key, dir)) = pending.pop() {
        let mut files = Vec::default();
        let entries = fs::read_dir(&dir)
            .unwrap_or_else(|e| panic!("unable to list '{}': {e}", dir.display()));

        for entry in entries.map(|entry| entry.expect("i/o error while listing tests")) {
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();

            if path.is_dir() {
                let inner = match key.is_empty() {
                    true => name,
                    false => format!("{key}/{name}"),
                };

                pending.push((inner, path));
            } else if path.extension().is_some_and(|ext| ext == "mir") {
                files.push(read_case(name, path));
            }
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));
        found.insert(key, files);
    }

    found
}

/// Every test file directly inside `tests/filetests/<path>`, sorted by name.
pub fn cases_in_subdir(path: &str) -> &'static [TestFile] {
    match TEST_FILES.get_or_init(discover).get(path) {
        Some(files) => files.as_slice(),
        None => panic!("no test directory `tests/filetests/{path}`"),
    }
}
