mod external_stager;
mod inline_stager;
mod stager_factory;

pub use external_stager::ExternalPayloadStager;
pub use inline_stager::InlinePayloadStager;
pub use stager_factory::PayloadStagerFactory;
