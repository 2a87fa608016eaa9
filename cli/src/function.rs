//! `kfn function create`: validation rules and the Knative Service it
//! produces.

use command_guard_core::{
    CommandGuard, args_conjunction, as_pre_run, at_least_one_of, at_most_one_of, at_position,
    exact_args, flags_conjunction, flags_dependency, valid_name,
};
use serde::Serialize;

pub const SERVING_API_VERSION: &str = "serving.knative.dev/v1alpha1";

/// Validation for `function create NAME`.
///
/// Exactly one of `--image` and `--git-repo` must be given, and
/// `--git-revision` only makes sense with `--git-repo`.
pub fn create_guard() -> CommandGuard {
    CommandGuard::new()
        .with_args(args_conjunction([exact_args(1), at_position(0, valid_name())]))
        .with_pre_run(as_pre_run(flags_conjunction([
            at_least_one_of(&["image", "git-repo"]),
            at_most_one_of(&["image", "git-repo"]),
            flags_dependency("git-revision", at_least_one_of(&["git-repo"])),
        ])))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateFunctionOptions {
    pub name: String,
    pub namespace: String,
    pub image: String,
}

/// Source build settings, present when the function is built from git.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub git_repo: String,
    pub git_revision: String,
    pub namespace: String,
}

/// Revision built when `--git-revision` is not given.
pub const DEFAULT_GIT_REVISION: &str = "master";

/// Image reference for a function built from source. Tagged with the
/// requested revision, or `latest` when none was requested.
pub fn source_image(registry: &str, name: &str, revision: Option<&str>) -> String {
    let tag = revision.unwrap_or("latest");
    format!("{}/{name}:{tag}", registry.trim_end_matches('/'))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: ServiceSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    pub run_latest: RunLatest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunLatest {
    pub configuration: ConfigurationSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildSpec>,
    pub revision_template: RevisionTemplateSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSpec {
    pub metadata: ObjectMeta,
    pub source: GitSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitSource {
    pub url: String,
    pub revision: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionTemplateSpec {
    pub spec: RevisionSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionSpec {
    pub container: Container,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Container {
    pub image: String,
}

/// Shapes the Service that runs the latest revision of the function.
pub fn build_service(options: &CreateFunctionOptions, build: Option<&BuildOptions>) -> Service {
    Service {
        api_version: SERVING_API_VERSION.to_string(),
        kind: "Service".to_string(),
        metadata: ObjectMeta {
            name: options.name.clone(),
            namespace: options.namespace.clone(),
        },
        spec: ServiceSpec {
            run_latest: RunLatest {
                configuration: ConfigurationSpec {
                    build: build.map(|build| BuildSpec {
                        metadata: ObjectMeta {
                            name: options.name.clone(),
                            namespace: build.namespace.clone(),
                        },
                        source: GitSource {
                            url: build.git_repo.clone(),
                            revision: build.git_revision.clone(),
                        },
                    }),
                    revision_template: RevisionTemplateSpec {
                        spec: RevisionSpec {
                            container: Container {
                                image: options.image.clone(),
                            },
                        },
                    },
                },
            },
        },
    }
}
