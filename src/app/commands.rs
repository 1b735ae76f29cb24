use crate::app::read_image_file;
use crate::config::cli::{
    Command, HeroArgs, HeroCommand, MaterialArgs, MaterialCommand, ServiceArgs, ServiceCommand,
};
use crate::core::editor::AdminContentEditor;
use crate::core::{DocumentStore, Notifier};
use crate::utils::error::Result;
use std::io::Write;

/// Executes one CLI command against a loaded editor, printing results to `out`.
pub async fn run<S, N, W>(
    editor: &mut AdminContentEditor<S, N>,
    command: Command,
    out: &mut W,
) -> Result<()>
where
    S: DocumentStore,
    N: Notifier,
    W: Write,
{
    match command {
        Command::Hero(HeroCommand::Show) => {
            let hero = editor.hero.content();
            writeln!(out, "Title:       {}", hero.title)?;
            writeln!(out, "Subtitle:    {}", hero.subtitle)?;
            writeln!(out, "Description: {}", hero.description)?;
        }
        Command::Hero(HeroCommand::Edit(args)) => {
            editor.hero.begin_edit();
            if let Some(draft) = editor.hero.draft_mut() {
                apply_hero_args(draft, args);
            }
            editor.hero.save().await?;
            writeln!(out, "✅ Hero content updated")?;
        }
        Command::Services(ServiceCommand::List) => {
            for entry in editor.services.items() {
                let service = &entry.value;
                writeln!(
                    out,
                    "{:>3}. {} [{}] ({})",
                    service.order_index, service.title, service.icon, entry.id
                )?;
                writeln!(out, "     image: {}", service.image_url)?;
                if let Some(photo) = service.icon_photo() {
                    writeln!(out, "     icon photo: {}", photo)?;
                }
            }
        }
        Command::Services(ServiceCommand::Add(args)) => {
            editor.services.open_create();
            apply_service_args(editor, args).await?;
            let id = editor.services.submit().await?;
            writeln!(out, "✅ Service created: {}", id)?;
        }
        Command::Services(ServiceCommand::Edit { id, fields }) => {
            editor.services.open_edit(&id)?;
            apply_service_args(editor, fields).await?;
            editor.services.submit().await?;
            writeln!(out, "✅ Service updated: {}", id)?;
        }
        Command::Services(ServiceCommand::Delete { id }) => {
            if editor.services.delete(&id).await? {
                writeln!(out, "🗑️ Service deleted: {}", id)?;
            } else {
                writeln!(out, "Deletion cancelled")?;
            }
        }
        Command::Materials(MaterialCommand::List) => {
            for entry in editor.materials.items() {
                writeln!(
                    out,
                    "{:>3}. {} ({})",
                    entry.value.order_index, entry.value.name, entry.id
                )?;
            }
        }
        Command::Materials(MaterialCommand::Add(args)) => {
            editor.materials.open_create();
            apply_material_args(editor, args);
            let id = editor.materials.submit().await?;
            writeln!(out, "✅ Material created: {}", id)?;
        }
        Command::Materials(MaterialCommand::Edit { id, fields }) => {
            editor.materials.open_edit(&id)?;
            apply_material_args(editor, fields);
            editor.materials.submit().await?;
            writeln!(out, "✅ Material updated: {}", id)?;
        }
        Command::Materials(MaterialCommand::Delete { id }) => {
            if editor.materials.delete(&id).await? {
                writeln!(out, "🗑️ Material deleted: {}", id)?;
            } else {
                writeln!(out, "Deletion cancelled")?;
            }
        }
        Command::UploadIcon { file } => {
            let image = read_image_file(&file).await?;
            let link = editor.services.upload_icon_file(&image).await?;
            writeln!(out, "{}", link)?;
        }
    }

    Ok(())
}

fn apply_hero_args(draft: &mut crate::core::HeroContent, args: HeroArgs) {
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(subtitle) = args.subtitle {
        draft.subtitle = subtitle;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }
}

async fn apply_service_args<S: DocumentStore, N: Notifier>(
    editor: &mut AdminContentEditor<S, N>,
    args: ServiceArgs,
) -> Result<()> {
    if let Some(form) = editor.services.form_mut() {
        if let Some(title) = args.title {
            form.title = title;
        }
        if let Some(description) = args.description {
            form.description = description;
        }
        if let Some(image_url) = args.image_url {
            form.image_url = image_url;
        }
        if let Some(icon) = args.icon {
            form.icon = icon;
        }
        if let Some(order_index) = args.order_index {
            form.order_index = order_index;
        }
    }

    if args.clear_icon_photo {
        editor.services.clear_icon_photo();
    }
    if let Some(path) = args.icon_file {
        let image = read_image_file(&path).await?;
        editor.services.upload_icon(image).await?;
    }
    Ok(())
}

fn apply_material_args<S: DocumentStore, N: Notifier>(
    editor: &mut AdminContentEditor<S, N>,
    args: MaterialArgs,
) {
    if let Some(form) = editor.materials.form_mut() {
        if let Some(name) = args.name {
            form.name = name;
        }
        if let Some(order_index) = args.order_index {
            form.order_index = order_index;
        }
    }
}
