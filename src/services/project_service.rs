// ==================== PROJECTS ====================
// CRUD de projetos. Nome/avatar do dono são copiados do usuário em cada
// create/update e podem ficar desatualizados se o perfil mudar depois.

use mongodb::bson::oid::ObjectId;
use std::collections::HashSet;

use crate::{
    database::{ProjectRepository, Store, UserRepository},
    models::Project,
    utils::error::AppError,
};

pub async fn list_projects(db: &dyn Store) -> Result<Vec<Project>, AppError> {
    db.find_all_projects().await
}

pub async fn get_project(db: &dyn Store, id: &ObjectId) -> Result<Project, AppError> {
    db.find_project_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Project not found"))
}

pub async fn list_by_user(db: &dyn Store, user_id: &ObjectId) -> Result<Vec<Project>, AppError> {
    db.find_projects_by_user(user_id).await
}

/// Copia nome/avatar do dono para o projeto
async fn denormalize_owner(db: &dyn Store, project: &mut Project) -> Result<(), AppError> {
    let owner = db
        .find_user_by_id(&project.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project owner not found"))?;

    project.user_name = owner.name;
    project.user_avatar = owner.avatar;
    Ok(())
}

pub async fn create_project(db: &dyn Store, mut project: Project) -> Result<Project, AppError> {
    denormalize_owner(db, &mut project).await?;

    let now = chrono::Utc::now().timestamp();
    project.created_at = now;
    project.updated_at = now;

    project.id = Some(db.insert_project(&project).await?);
    log::info!(
        "✅ Project '{}' created for user {}",
        project.title,
        project.user_id.to_hex()
    );

    Ok(project)
}

/// Substitui os campos do projeto `id`; `created_at` é preservado.
pub async fn update_project(
    db: &dyn Store,
    id: &ObjectId,
    mut project: Project,
) -> Result<Project, AppError> {
    let existing = get_project(db, id).await?;

    denormalize_owner(db, &mut project).await?;

    project.id = Some(*id);
    project.created_at = existing.created_at;
    project.updated_at = chrono::Utc::now().timestamp();

    if !db.replace_project(&project).await? {
        return Err(AppError::not_found("Project not found"));
    }

    log::info!("✅ Project {} updated", id.to_hex());
    Ok(project)
}

/// Idempotente: id inexistente não é erro aqui (a borda checa antes).
pub async fn delete_project(db: &dyn Store, id: &ObjectId) -> Result<(), AppError> {
    let deleted = db.delete_project(id).await?;
    log::info!("🗑️ Project {} deleted ({} documents)", id.to_hex(), deleted);
    Ok(())
}

/// Busca por título e por tecnologia. Resultados do título primeiro, depois
/// os de tecnologia que ainda não apareceram, cada grupo na ordem em que veio.
pub async fn search_projects(db: &dyn Store, query: &str) -> Result<Vec<Project>, AppError> {
    let by_title = db.search_projects_by_title(query).await?;
    let by_technology = db.search_projects_by_technology(query).await?;

    Ok(merge_unique(by_title, by_technology, |p| p.id))
}

/// Concatena `first` e os itens de `second` cujo id ainda não apareceu
pub fn merge_unique<T, F>(first: Vec<T>, second: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> Option<ObjectId>,
{
    let mut seen: HashSet<ObjectId> = first.iter().filter_map(&key).collect();
    let mut merged = first;

    for item in second {
        match key(&item) {
            Some(id) => {
                if seen.insert(id) {
                    merged.push(item);
                }
            }
            None => merged.push(item),
        }
    }

    merged
}
