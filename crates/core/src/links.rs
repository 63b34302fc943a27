//! Link targets for grid elements

pub fn version_link(version_id: &str) -> String {
    format!("/version/{}", version_id)
}

pub fn task_link(task_id: &str) -> String {
    format!("/task/{}", task_id)
}

pub fn build_variant_link(project: &str, variant_id: &str) -> String {
    format!("/build_variant/{}/{}", project, variant_id)
}
