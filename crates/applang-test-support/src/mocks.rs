//! Mock implementations for testing

use applang_foundation::{ApplangResult, ProcessIdentity, RuleSet, RuleStore};
use applang_intercept::{EntryPoint, InterceptInstaller, InterceptResult};
use mockall::mock;
use std::path::PathBuf;

mock! {
    pub RuleStore {}

    impl RuleStore for RuleStore {
        fn rules(&self) -> RuleSet;
        fn reload(&self) -> ApplangResult<()>;
    }
}

mock! {
    pub ProcessIdentity {}

    impl ProcessIdentity for ProcessIdentity {
        fn image_path(&self) -> ApplangResult<PathBuf>;
    }
}

mock! {
    pub InterceptInstaller {}

    impl InterceptInstaller for InterceptInstaller {
        fn install(&mut self, entry: EntryPoint, detour: *const ()) -> InterceptResult<*const ()>;
        fn commit(&mut self) -> InterceptResult<()>;
        fn uninstall_all(&mut self);
    }
}
