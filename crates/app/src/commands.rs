//! Command handlers.

use std::path::Path;

use anyhow::{Context as _, bail};
use flockloop_application::TokenStore;
use flockloop_application::use_cases::{
    SignIn, SignInInput, SignOut, UploadMedia, UploadMediaInput,
};
use flockloop_domain::{
    CampaignCreate, InvitationAcceptRequest, InvitationSendRequest, OrgRegistrationRequest,
    RegisterRequest, ResendConfirmationRequest, SubmissionCreate, SubmissionReview, TrackCreate,
};
use flockloop_infrastructure::ClientConfig;
use serde::Serialize;

use crate::cli::{
    CampaignCommand, Cli, Command, MediaCommand, OrgCommand, SubmissionCommand, TrackCommand,
};
use crate::context::ClientContext;

/// Loads configuration for `cli` and runs its command.
///
/// # Errors
///
/// Returns configuration, I/O and API errors.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    let context = ClientContext::from_config(config)?;
    execute(&context, cli.command).await
}

/// Runs one command against an already built context.
///
/// # Errors
///
/// Returns I/O and API errors.
pub async fn execute(context: &ClientContext, command: Command) -> anyhow::Result<()> {
    let api = &context.client;
    match command {
        Command::Login { email, password } => {
            let output = SignIn::new(api.clone())
                .execute(SignInInput { email, password })
                .await?;
            print_json(&output.user)
        }
        Command::Logout => {
            SignOut::new(api.clone()).execute().await;
            Ok(())
        }
        Command::Whoami => {
            if !context.store.is_authenticated() {
                bail!("not signed in, run `flockloop login` first");
            }
            let user = api.auth().me().await?;
            context.store.set_user(user.clone());
            print_json(&user)
        }
        Command::Register {
            email,
            name,
            password,
        } => print_json(
            &api.auth()
                .register(&RegisterRequest {
                    email,
                    name,
                    password,
                })
                .await?,
        ),
        Command::ConfirmEmail { token } => print_json(&api.auth().confirm_email(&token).await?),
        Command::ResendConfirmation { email } => print_json(
            &api.auth()
                .resend_confirmation(&ResendConfirmationRequest { email })
                .await?,
        ),
        Command::Org(command) => org(context, command).await,
        Command::Campaigns(command) => campaigns(context, command).await,
        Command::Tracks(command) => tracks(context, command).await,
        Command::Submissions(command) => submissions(context, command).await,
        Command::Media(command) => media(context, command).await,
    }
}

async fn org(context: &ClientContext, command: OrgCommand) -> anyhow::Result<()> {
    let orgs = context.client.organisations();
    match command {
        OrgCommand::Register {
            org_name,
            email,
            name,
            password,
        } => print_json(
            &orgs
                .register(&OrgRegistrationRequest {
                    org_name,
                    email,
                    name,
                    password,
                })
                .await?,
        ),
        OrgCommand::Invite { email } => {
            print_json(&orgs.send_invitation(&InvitationSendRequest { email }).await?)
        }
        OrgCommand::Invitations => print_json(&orgs.list_invitations().await?),
        OrgCommand::Revoke { id } => print_json(&orgs.revoke_invitation(id).await?),
        OrgCommand::Accept {
            token,
            name,
            password,
        } => print_json(
            &orgs
                .accept_invitation(&InvitationAcceptRequest {
                    token,
                    name,
                    password,
                })
                .await?,
        ),
    }
}

async fn campaigns(context: &ClientContext, command: CampaignCommand) -> anyhow::Result<()> {
    let campaigns = context.client.campaigns();
    match command {
        CampaignCommand::List => print_json(&campaigns.list().await?),
        CampaignCommand::Show { id } => print_json(&campaigns.get(id).await?),
        CampaignCommand::Create { name, track_id } => {
            print_json(&campaigns.create(&CampaignCreate { name, track_id }).await?)
        }
    }
}

async fn tracks(context: &ClientContext, command: TrackCommand) -> anyhow::Result<()> {
    let tracks = context.client.tracks();
    match command {
        TrackCommand::List => print_json(&tracks.list().await?),
        TrackCommand::Show { id } => print_json(&tracks.get(id).await?),
        TrackCommand::Create {
            title,
            artist,
            media_id,
            thumbnail_id,
        } => print_json(
            &tracks
                .create(&TrackCreate {
                    title,
                    artist,
                    media_id,
                    thumbnail_id,
                })
                .await?,
        ),
    }
}

async fn submissions(context: &ClientContext, command: SubmissionCommand) -> anyhow::Result<()> {
    let submissions = context.client.submissions();
    match command {
        SubmissionCommand::List { campaign: None } => print_json(&submissions.list().await?),
        SubmissionCommand::List {
            campaign: Some(campaign_id),
        } => print_json(&submissions.list_by_campaign(campaign_id).await?),
        SubmissionCommand::Create {
            campaign,
            media,
            thumbnail,
        } => print_json(
            &submissions
                .create(&SubmissionCreate {
                    campaign_id: campaign,
                    media_id: media,
                    thumbnail_id: thumbnail,
                })
                .await?,
        ),
        SubmissionCommand::Review(args) => print_json(
            &submissions
                .review(
                    args.id,
                    &SubmissionReview {
                        decision: args.decision.into(),
                        feedback: args.feedback,
                    },
                )
                .await?,
        ),
    }
}

async fn media(context: &ClientContext, command: MediaCommand) -> anyhow::Result<()> {
    match command {
        MediaCommand::Upload {
            file,
            kind,
            content_type,
        } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let content_type = content_type.unwrap_or_else(|| guess_content_type(&file));
            let media = UploadMedia::new(context.client.clone())
                .execute(UploadMediaInput {
                    filename: file_name(&file)?,
                    content_type,
                    media_type: kind.into(),
                    bytes,
                })
                .await?;
            print_json(&media)
        }
        MediaCommand::DownloadUrl { id } => {
            print_json(&context.client.media().download_url(id).await?)
        }
    }
}

fn guess_content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

fn file_name(path: &Path) -> anyhow::Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .with_context(|| format!("{} has no usable file name", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
