/// Declares a test over a fixture script in `tests/target/<scope>/<file>.lox`.
///
/// The `OK` form runs the fixture through the library with a captured output
/// buffer and compares what the program printed, line for line. The `ERR`
/// form spawns the compiled `lox` binary instead, asserting the exact stderr
/// text and the exit code (2 for scan/parse/resolve errors, 3 for runtime
/// errors), since reporting and exit codes live at the process boundary.
#[macro_export]
macro_rules! tests {
    ($file:ident in $scope:ident is OK $($expected:expr)*) => {
        #[test]
        fn $file() {
            use lox_lang::Lox;

            let mut expected = vec![$($expected),*];

            let expected = match expected.len() {
                0 => String::new(),
                _ => {
                    // Program output is line-terminated, so the last line
                    // needs a trailing newline too.
                    expected.push("");
                    expected.join("\n")
                }
            };

            let mut output = Vec::new();
            let mut lox = Lox::new(&mut output);

            lox.run_file(&format!("tests/target/{}/{}.lox", stringify!($scope), stringify!($file)));

            // Release the borrow on the buffer before reading it back.
            drop(lox);
            assert_eq!(expected, std::str::from_utf8(&output).unwrap());
        }
    };

    ($file:ident in $scope:ident is ERR($code:expr) $($expected:expr)+) => {
        #[test]
        fn $file() {
            use assert_cmd::Command;

            let output = vec![$($expected),+].join("\n");
            let file = format!("tests/target/{}/{}.lox", stringify!($scope), stringify!($file));

            Command::cargo_bin("lox").unwrap()
                .arg(file)
                .assert()
                .stderr(format!("{output}\n"))
                .code($code);
        }
    };
}
