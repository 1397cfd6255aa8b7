/// Sample settings written by `run-in-terminal init`.
pub fn create_default_config() -> String {
    // Use raw JSON string to preserve exact field order
    r#"{
  "commands": [
    {
      "name": "run",
      "match": "\\.rs$",
      "cmd": "cargo run"
    },
    {
      "name": "test",
      "match": "\\.rs$",
      "cmd": "cargo test ${fileBasenameNoExt}"
    },
    {
      "name": "run",
      "match": "\\.py$",
      "cmd": "python3 ${file}"
    },
    {
      "name": "test",
      "match": "_test\\.go$",
      "cmd": "go test ${fileDirname}"
    },
    {
      "name": "run",
      "match": "\\.go$",
      "cmd": "go run ${file}"
    },
    {
      "name": "test",
      "match": "\\.(spec|test)\\.[jt]s$",
      "cmd": "npx jest ${relativeFile}"
    }
  ],
  "clearBeforeRun": false,
  "saveAllBeforeRun": false
}
"#
    .to_string()
}
