//! CLI parsing tests for generate command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use crate::typemap::{Backend, Dialect};
    use clap::Parser;
    use rstest::rstest;

    crate::cli_defaults_test! {
        command: "generate",
        variant: Generate,
        required_args: [],
        defaults: {
            backend: None,
            dialect: None,
            selection.preset: None,
            selection.custom: None,
        },
    }

    crate::cli_option_test! {
        command: "generate",
        variant: Generate,
        test_name: test_generate_with_backend,
        args: ["--backend", "prisma"],
        field: backend,
        expected: Some(Backend::Prisma),
    }

    crate::cli_option_test! {
        command: "generate",
        variant: Generate,
        test_name: test_generate_with_dialect_alias,
        args: ["-b", "drizzle", "-d", "postgres"],
        field: dialect,
        expected: Some(Dialect::Postgresql),
    }

    crate::cli_option_test! {
        command: "generate",
        variant: Generate,
        test_name: test_generate_with_preset,
        args: ["-b", "kysely", "--preset", "blog"],
        field: selection.preset,
        expected: Some("blog".to_string()),
    }

    crate::cli_option_test! {
        command: "generate",
        variant: Generate,
        test_name: test_generate_with_table_list,
        args: ["-b", "kysely", "--tables", "comments,tags"],
        field: selection.tables,
        expected: vec!["comments".to_string(), "tags".to_string()],
    }

    crate::cli_error_test! {
        command: "generate",
        test_name: test_generate_rejects_unknown_backend,
        args: ["--backend", "sequelize"],
    }

    crate::cli_error_test! {
        command: "generate",
        test_name: test_generate_rejects_preset_with_tables,
        args: ["-b", "drizzle", "--preset", "blog", "--tables", "users"],
    }

    #[rstest]
    fn test_global_options_after_subcommand() {
        let args = Args::try_parse_from([
            "schemagen",
            "generate",
            "-b",
            "drizzle",
            "--format",
            "json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.format, crate::output::OutputFormat::Json);
        assert_eq!(args.log_level, crate::cli::LogLevel::Debug);
    }
}
