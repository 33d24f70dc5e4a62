/// Two plain pages with nothing but question sets.
pub fn plain_quiz() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<Session>
	<Page ID="Anatomy" Descriptor="Identify the structure">
		<Image ID="CT" Type="Volume">
			<Path>images/ct.nrrd</Path>
		</Image>
		<QuestionSet ID="QS1" Descriptor="Location">
			<Question Descriptor="Which lobe?">
				<Option ID="upper">Upper</Option>
				<Option ID="lower">Lower</Option>
			</Question>
		</QuestionSet>
	</Page>
	<Page ID="Confidence">
		<QuestionSet ID="QS2">
			<Question Descriptor="How confident are you?">
				<Option ID="high">High</Option>
			</Question>
		</QuestionSet>
	</Page>
</Session>
"#
}

/// A page group that loops, bracketed by pages outside any group.
pub fn looping_quiz() -> &'static str {
    r#"<Session>
	<Page ID="Welcome" PageGroup="0" PageComplete="Y"/>
	<Page ID="Case" PageGroup="1" Rep="0" Loop="Y" BookmarkID="CaseStart">
		<Image ID="CT" SegmentRequired="Y">
			<LabelMapPath ResponseTime="20240603_13:00:00.000000">old/seg.nrrd</LabelMapPath>
			<MarkupLinePath ResponseTime="20240603_13:00:01.000000">old/line.json</MarkupLinePath>
		</Image>
		<QuestionSet ID="QS-Case">
			<Question><Option ID="benign"><Response>Y</Response></Option></Question>
		</QuestionSet>
	</Page>
	<Page ID="Summary" PageGroup="2" Rep="0"/>
	<Page ID="Goodbye" PageGroup="0"/>
</Session>"#
}

/// Three randomizable groups with fixed first and last pages.
pub fn grouped_quiz() -> &'static str {
    r#"<Session RandomizePageGroups="Y">
	<Page ID="Intro" PageGroup="0"/>
	<Page ID="A1" PageGroup="1"/>
	<Page ID="A2" PageGroup="1"/>
	<Page ID="B1" PageGroup="2"/>
	<Page ID="C1" PageGroup="3"/>
	<Page ID="C2" PageGroup="3"/>
	<Page ID="Outro" PageGroup="0"/>
</Session>"#
}

/// A first page producing a labelmap that a later page redisplays.
pub fn redisplay_quiz() -> &'static str {
    r#"<Session>
	<Page ID="Draw">
		<Image ID="CT" LabelMapID="Tumor"/>
	</Page>
	<Page ID="Refine">
		<Image ID="CT" SegmentRequired="Y" DisplayLabelMapID="Tumor"/>
		<Image ID="Mask"><Layer>Segmentation</Layer></Image>
	</Page>
</Session>"#
}
