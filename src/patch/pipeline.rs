//! The per-file transformation and the run loop.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::imports::{ImportNormalizer, ImportPolicy};
use super::insertion::{splice, InsertionStrategy, Locator};
use super::outcome::{FileOutcome, RunSummary, Transformation};
use super::walker::{TreeWalker, DEFAULT_EXTENSION};
use super::writer::{FsSourceStore, SourceStore, Writer};
use crate::contract::{self, CONTRACTS};
use crate::error::Result;
use crate::ui::UserInterface;

/// Knobs of a patch run.
#[derive(Debug, Clone)]
pub struct PatchOptions {
    /// Extension of candidate files, without the dot.
    pub extension: String,
    /// Directive added to files referencing a marker.
    pub import: String,
    /// When the directive is added.
    pub import_policy: ImportPolicy,
    /// How the primary type's closing brace is found.
    pub strategy: InsertionStrategy,
    /// Compute outcomes without writing.
    pub dry_run: bool,
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            import: super::imports::DEFAULT_IMPORT.to_string(),
            import_policy: ImportPolicy::default(),
            strategy: InsertionStrategy::default(),
            dry_run: false,
        }
    }
}

/// Closes contract gaps in source files.
///
/// # Example
///
/// ```
/// use contractfill::patch::{PatchOptions, Patcher};
///
/// let patcher = Patcher::new(PatchOptions::default());
/// let input = "public class Cliente : ISoftDeletableEntity\n{\n}\n";
///
/// let once = patcher.transform(input).unwrap();
/// assert!(once.text.contains("public bool Excluido"));
///
/// let twice = patcher.transform(&once.text).unwrap();
/// assert_eq!(twice.text, once.text);
/// ```
pub struct Patcher {
    options: PatchOptions,
    normalizer: ImportNormalizer,
    locator: Box<dyn Locator>,
    writer: Writer,
}

impl Patcher {
    /// Create a patcher working on the filesystem.
    pub fn new(options: PatchOptions) -> Self {
        Self::with_store(options, Box::new(FsSourceStore))
    }

    /// Create a patcher over a custom store.
    pub fn with_store(options: PatchOptions, store: Box<dyn SourceStore>) -> Self {
        Self {
            normalizer: ImportNormalizer::new(options.import.clone()),
            locator: options.strategy.locator(),
            writer: Writer::new(store, options.dry_run),
            options,
        }
    }

    /// Apply both contracts and the import rule to one file's text.
    ///
    /// Contracts are checked in order against the text as mutated so far,
    /// so a file needing both gets the soft-delete block first.
    pub fn transform(&self, original: &str) -> Result<Transformation> {
        let mut text = original.to_string();
        let mut result = Transformation::default();

        let import_needed =
            contract::references_any(&text) && !self.normalizer.is_present(&text);

        if import_needed && self.options.import_policy == ImportPolicy::Eager {
            result.import_added = self.normalizer.ensure(&mut text);
        }

        for contract in CONTRACTS {
            if !contract.has_gap(&text) {
                continue;
            }
            match self.locator.locate(&text, &contract)? {
                Some(point) => {
                    splice(&mut text, point, contract.template);
                    result.inserted.push(contract.kind);
                }
                None => {
                    debug!(
                        "No insertion point for {} ({} locator)",
                        contract.kind,
                        self.locator.name()
                    );
                    result.skipped.push(contract.kind);
                }
            }
        }

        if import_needed
            && self.options.import_policy == ImportPolicy::Atomic
            && !result.inserted.is_empty()
        {
            result.import_added = self.normalizer.ensure(&mut text);
        }

        result.text = text;
        Ok(result)
    }

    /// Read, transform and conditionally write one file.
    pub fn process_file(&mut self, path: &Path) -> Result<FileOutcome> {
        let mut unit = self.writer.load(path)?;
        let transformation = self.transform(unit.original())?;
        unit.text = transformation.text.clone();

        let changed = self.writer.persist(&unit)?;
        if !transformation.skipped.is_empty() {
            debug!(
                "{}: left gaps open for {:?}",
                path.display(),
                transformation.skipped
            );
        }

        Ok(FileOutcome {
            path: path.to_path_buf(),
            changed,
            transformation,
        })
    }

    /// Walk `root` and process every candidate file.
    ///
    /// One line is reported per modified file as it is written. A read or
    /// write failure aborts the run; files already written stay written.
    pub fn run(&mut self, root: &Path, ui: &mut dyn UserInterface) -> Result<RunSummary> {
        let walker = TreeWalker::new(root, &self.options.extension);
        let mut summary = RunSummary {
            root: root.to_path_buf(),
            dry_run: self.writer.is_dry_run(),
            ..Default::default()
        };

        if !walker.root_exists() {
            info!("Root {} does not exist", root.display());
            summary.root_missing = true;
            return Ok(summary);
        }

        let files: Vec<PathBuf> = walker.files().collect();
        for path in files {
            summary.files_scanned += 1;
            let outcome = self.process_file(&path)?;

            if outcome.changed {
                let verb = if summary.dry_run {
                    "Would process"
                } else {
                    "Processed"
                };
                ui.message(&format!("{}: {}", verb, path.display()));
            }
            for kind in &outcome.transformation.skipped {
                ui.detail(&format!(
                    "{}: no insertion point for {} members",
                    path.display(),
                    kind
                ));
            }

            if outcome.changed || !outcome.transformation.skipped.is_empty() {
                summary.outcomes.push(outcome);
            }
        }

        info!(
            "Scanned {} files, {} modified",
            summary.files_scanned,
            summary.modified_count()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ContractKind;
    use crate::error::PatchError;
    use crate::ui::{MockUI, OutputMode};
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    const SOFT: &str = "using System;\n\nnamespace CoreApp.Domain.Entities;\n\npublic class Cliente : ISoftDeletableEntity\n{\n    public int Id { get; set; }\n}\n";

    const BOTH: &str = "namespace CoreApp.Domain.Entities;\n\npublic class Pedido : BaseEntity, ISoftDeletableEntity, IArchivableEntity\n{\n    public int Id { get; set; }\n}\n\n/// <summary>\n/// Situação do pedido\n/// </summary>\npublic enum StatusPedido\n{\n    Aberto,\n    Fechado\n}\n";

    const PLAIN: &str = "namespace CoreApp.Domain.Entities;\n\npublic class Produto\n{\n    public int Id { get; set; }\n}\n";

    fn patcher() -> Patcher {
        Patcher::new(PatchOptions::default())
    }

    fn patcher_with(strategy: InsertionStrategy, import_policy: ImportPolicy) -> Patcher {
        Patcher::new(PatchOptions {
            strategy,
            import_policy,
            ..Default::default()
        })
    }

    #[test]
    fn closes_soft_delete_gap() {
        let result = patcher().transform(SOFT).unwrap();

        assert_eq!(result.inserted, vec![ContractKind::SoftDelete]);
        assert!(result.import_added);
        assert!(result.text.contains("public bool Excluido"));
        assert!(result.text.contains("public void Restore()"));
        assert!(result
            .text
            .ends_with("        MotivoExclusao = null;\n    }\n}\n"));
    }

    #[test]
    fn transformation_is_idempotent() {
        for strategy in [InsertionStrategy::Structural, InsertionStrategy::Pattern] {
            let p = patcher_with(strategy, ImportPolicy::Atomic);
            for input in [SOFT, BOTH, PLAIN] {
                let once = p.transform(input).unwrap();
                let twice = p.transform(&once.text).unwrap();
                assert_eq!(twice.text, once.text);
                assert!(twice.inserted.is_empty());
                assert!(!twice.import_added);
            }
        }
    }

    #[test]
    fn no_marker_means_no_change() {
        let result = patcher().transform(PLAIN).unwrap();
        assert_eq!(result.text, PLAIN);
        assert_eq!(result, Transformation { text: PLAIN.to_string(), ..Default::default() });
    }

    #[test]
    fn implemented_contract_is_left_alone() {
        let input = "using CoreApp.Domain.Entities.Common;\npublic class Cliente : ISoftDeletableEntity\n{\n    public bool Excluido { get; set; }\n}\n";
        let result = patcher().transform(input).unwrap();
        assert_eq!(result.text, input);
    }

    #[test]
    fn both_contracts_in_fixed_order_before_trailing_enum() {
        let result = patcher().transform(BOTH).unwrap();

        assert_eq!(
            result.inserted,
            vec![ContractKind::SoftDelete, ContractKind::Archivable]
        );
        let soft = result.text.find("public bool Excluido").unwrap();
        let restore = result.text.find("public void Restore()").unwrap();
        let archive = result.text.find("public DateTime UltimaMovimentacao").unwrap();
        let enum_at = result.text.find("public enum StatusPedido").unwrap();
        assert!(soft < restore);
        assert!(restore < archive);
        assert!(archive < enum_at);
        assert!(result
            .text
            .contains("        UltimaMovimentacao = DateTime.UtcNow;\n    }\n}\n\n/// <summary>"));
    }

    #[test]
    fn strategies_agree_on_single_contract_entity() {
        let structural = patcher_with(InsertionStrategy::Structural, ImportPolicy::Atomic);
        let pattern = patcher_with(InsertionStrategy::Pattern, ImportPolicy::Atomic);
        assert_eq!(
            structural.transform(SOFT).unwrap().text,
            pattern.transform(SOFT).unwrap().text
        );
    }

    #[test]
    fn structural_ignores_method_braces_before_doc_comments() {
        let input = "public class A : IArchivableEntity\n{\n    public void M()\n    {\n    }\n\n    /// <summary>\n    /// Y\n    /// </summary>\n    public int Y { get; set; }\n}\n";

        let structural = patcher().transform(input).unwrap();
        let y = structural.text.find("public int Y").unwrap();
        let block = structural.text.find("public bool Arquivado").unwrap();
        assert!(y < block);
        assert!(structural
            .text
            .ends_with("        UltimaMovimentacao = DateTime.UtcNow;\n    }\n}\n"));

        // The regex stops at the first brace followed by a doc comment,
        // which here closes M().
        let pattern = patcher_with(InsertionStrategy::Pattern, ImportPolicy::Atomic)
            .transform(input)
            .unwrap();
        let method = pattern.text.find("public void M()").unwrap();
        let block = pattern.text.find("public bool Arquivado").unwrap();
        let y = pattern.text.find("public int Y").unwrap();
        assert!(method < block && block < y);
    }

    #[test]
    fn import_added_once_after_existing_directives() {
        let result = patcher().transform(SOFT).unwrap();
        assert!(result.text.starts_with(
            "using System;\nusing CoreApp.Domain.Entities.Common;\n\nnamespace CoreApp.Domain.Entities;\n"
        ));
        assert_eq!(
            result.text.matches("using CoreApp.Domain.Entities.Common;").count(),
            1
        );
    }

    #[test]
    fn atomic_policy_skips_import_without_insertion() {
        let input = "using System;\n// implements ISoftDeletableEntity elsewhere\n";
        let result = patcher().transform(input).unwrap();

        assert_eq!(result.skipped, vec![ContractKind::SoftDelete]);
        assert!(!result.import_added);
        assert_eq!(result.text, input);
    }

    #[test]
    fn eager_policy_adds_import_without_insertion() {
        let input = "using System;\n// implements ISoftDeletableEntity elsewhere\n";
        let result = patcher_with(InsertionStrategy::Structural, ImportPolicy::Eager)
            .transform(input)
            .unwrap();

        assert_eq!(result.skipped, vec![ContractKind::SoftDelete]);
        assert!(result.import_added);
        assert!(result.text.contains("using CoreApp.Domain.Entities.Common;"));
    }

    #[test]
    fn pattern_strategy_skips_unrecognized_layout() {
        let input = "public class A : IArchivableEntity\n{\n    int x;\n}\n// trailing note\n";
        let result = patcher_with(InsertionStrategy::Pattern, ImportPolicy::Atomic)
            .transform(input)
            .unwrap();

        assert_eq!(result.skipped, vec![ContractKind::Archivable]);
        assert_eq!(result.text, input);

        let structural = patcher().transform(input).unwrap();
        assert_eq!(structural.inserted, vec![ContractKind::Archivable]);
    }

    fn write_tree(root: &Path) {
        fs::create_dir_all(root.join("Vendas")).unwrap();
        fs::write(root.join("Cliente.cs"), SOFT).unwrap();
        fs::write(root.join("Vendas/Pedido.cs"), BOTH).unwrap();
        fs::write(root.join("Produto.cs"), PLAIN).unwrap();
        fs::write(root.join("notes.txt"), "ISoftDeletableEntity").unwrap();
    }

    #[test]
    fn run_patches_tree_and_reports() {
        let temp = TempDir::new().unwrap();
        write_tree(temp.path());
        let mut ui = MockUI::new();

        let summary = patcher().run(temp.path(), &mut ui).unwrap();

        assert_eq!(summary.files_scanned, 3);
        assert_eq!(summary.modified_count(), 2);
        assert!(ui.has_message("Processed:"));
        assert!(ui.has_message("Cliente.cs"));
        assert!(ui.has_message("Pedido.cs"));
        assert!(!ui.has_message("Produto.cs"));
        assert_eq!(fs::read_to_string(temp.path().join("Produto.cs")).unwrap(), PLAIN);
        assert_eq!(
            fs::read_to_string(temp.path().join("notes.txt")).unwrap(),
            "ISoftDeletableEntity"
        );
        assert!(fs::read_to_string(temp.path().join("Cliente.cs"))
            .unwrap()
            .contains("public bool Excluido"));
    }

    #[test]
    fn second_run_modifies_nothing() {
        let temp = TempDir::new().unwrap();
        write_tree(temp.path());

        patcher().run(temp.path(), &mut MockUI::new()).unwrap();
        let mut ui = MockUI::new();
        let summary = patcher().run(temp.path(), &mut ui).unwrap();

        assert_eq!(summary.modified_count(), 0);
        assert!(ui.messages().is_empty());
    }

    #[test]
    fn dry_run_leaves_files_untouched() {
        let temp = TempDir::new().unwrap();
        write_tree(temp.path());
        let mut ui = MockUI::new();

        let summary = Patcher::new(PatchOptions {
            dry_run: true,
            ..Default::default()
        })
        .run(temp.path(), &mut ui)
        .unwrap();

        assert!(summary.dry_run);
        assert_eq!(summary.modified_count(), 2);
        assert!(ui.has_message("Would process:"));
        assert_eq!(fs::read_to_string(temp.path().join("Cliente.cs")).unwrap(), SOFT);
    }

    #[test]
    fn missing_root_is_empty_result() {
        let temp = TempDir::new().unwrap();
        let summary = patcher()
            .run(&temp.path().join("missing"), &mut MockUI::new())
            .unwrap();

        assert!(summary.root_missing);
        assert_eq!(summary.files_scanned, 0);
    }

    #[test]
    fn skipped_gaps_show_in_verbose_mode() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Nota.cs"), "// IArchivableEntity\n").unwrap();
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        let summary = patcher().run(temp.path(), &mut ui).unwrap();

        assert_eq!(summary.modified_count(), 0);
        assert_eq!(summary.skipped().count(), 1);
        assert_eq!(ui.details().len(), 1);
    }

    #[test]
    fn skipped_gaps_are_silent_by_default() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Nota.cs"), "// IArchivableEntity\n").unwrap();
        let mut ui = MockUI::new();

        let summary = patcher().run(temp.path(), &mut ui).unwrap();

        assert_eq!(summary.skipped().count(), 1);
        assert!(ui.messages().is_empty());
        assert!(ui.details().is_empty());
        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn bom_prefixed_entity_keeps_bom_and_import_order() {
        let input = "\u{FEFF}using System;\n\nnamespace App;\n\npublic class Cliente : ISoftDeletableEntity\n{\n    public int Id { get; set; }\n}\n";

        let result = patcher().transform(input).unwrap();

        assert!(result.text.starts_with(
            "\u{FEFF}using System;\nusing CoreApp.Domain.Entities.Common;\n\nnamespace App;\n"
        ));
        assert_eq!(result.text.matches('\u{FEFF}').count(), 1);
        assert!(result.text.contains("public bool Excluido"));
    }

    #[test]
    fn bom_prefixed_equivalent_directive_is_not_duplicated() {
        let input = "\u{FEFF}global using CoreApp.Domain.Entities.Common ;\n\npublic class Cliente : ISoftDeletableEntity\n{\n}\n";

        let result = patcher().transform(input).unwrap();

        assert!(!result.import_added);
        assert_eq!(result.inserted, vec![ContractKind::SoftDelete]);
        assert_eq!(result.text.matches("CoreApp.Domain.Entities.Common").count(), 1);
    }

    #[derive(Default, Clone)]
    struct ObservingStore {
        writes: Rc<RefCell<Vec<PathBuf>>>,
    }

    impl SourceStore for ObservingStore {
        fn read(&self, path: &Path) -> Result<String> {
            FsSourceStore.read(path)
        }

        fn write(&mut self, path: &Path, text: &str) -> Result<()> {
            self.writes.borrow_mut().push(path.to_path_buf());
            FsSourceStore.write(path, text)
        }
    }

    #[test]
    fn unmodified_files_are_never_written() {
        let temp = TempDir::new().unwrap();
        write_tree(temp.path());
        let store = ObservingStore::default();
        let mut p = Patcher::with_store(PatchOptions::default(), Box::new(store.clone()));

        p.run(temp.path(), &mut MockUI::new()).unwrap();
        let written: Vec<_> = store.writes.borrow().clone();
        assert_eq!(written.len(), 2);
        assert!(!written.iter().any(|w| w.ends_with("Produto.cs")));

        store.writes.borrow_mut().clear();
        p.run(temp.path(), &mut MockUI::new()).unwrap();
        assert!(store.writes.borrow().is_empty());
    }

    struct FailingStore;

    impl SourceStore for FailingStore {
        fn read(&self, path: &Path) -> Result<String> {
            FsSourceStore.read(path)
        }

        fn write(&mut self, path: &Path, _text: &str) -> Result<()> {
            Err(PatchError::WriteFailed {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn write_failure_aborts_run() {
        let temp = TempDir::new().unwrap();
        write_tree(temp.path());
        let mut p = Patcher::with_store(PatchOptions::default(), Box::new(FailingStore));

        let err = p.run(temp.path(), &mut MockUI::new()).unwrap_err();
        assert!(matches!(err, PatchError::WriteFailed { .. }));
    }
}
